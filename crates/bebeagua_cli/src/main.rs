//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bebeagua_core` linkage.
//! - Decode deep links passed as arguments for quick routing checks.

fn main() {
    println!("bebeagua_core ping={}", bebeagua_core::ping());
    println!("bebeagua_core version={}", bebeagua_core::core_version());

    for url in std::env::args().skip(1) {
        match bebeagua_core::decode(&url) {
            Some(link) => {
                let params = link
                    .params
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect::<Vec<_>>()
                    .join("&");
                println!("deep_link url={url} route={} params={params}", link.route);
            }
            None => println!("deep_link url={url} status=ignored"),
        }
    }
}
