//! Deep-link decode/encode over the static route table.
//!
//! # Invariants
//! - `decode` returns `None` exactly when the parsed path is absent.
//! - `encode` appends `?` only for non-empty params.
//! - Known routes round-trip: `decode(encode(r)) == r`.

use super::route::{external_path_for, internal_route_for};
use log::debug;
use std::collections::BTreeMap;
use url::Url;

/// Scheme prefix of every generated link.
pub const DEEP_LINK_PREFIX: &str = "bebeagua://";

/// Decoded deep link: internal route plus raw query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub route: String,
    pub params: BTreeMap<String, String>,
}

/// Output of the URL-parsing capability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// `None` when the URL has no usable path or could not be parsed.
    pub path: Option<String>,
    pub query_params: BTreeMap<String, String>,
}

/// URL-parsing capability.
pub trait UrlParser {
    /// Parses `url`. Rejected input yields a `ParsedUrl` without a path.
    fn parse(&self, url: &str) -> ParsedUrl;
}

/// Default parser backed by the `url` crate.
///
/// Custom schemes read `host + path` as the link path
/// (`bebeagua://stats/today` -> `stats/today`); `http(s)` links read the URL
/// path without its leading `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUrlParser;

impl UrlParser for StandardUrlParser {
    fn parse(&self, url: &str) -> ParsedUrl {
        let parsed = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!("event=deep_link_parse module=linking status=fallback error={err}");
                return parse_loosely(url.trim());
            }
        };

        let path_part = parsed.path().trim_start_matches('/');
        let path = if parsed.scheme() == "http" || parsed.scheme() == "https" {
            path_part.to_string()
        } else {
            match parsed.host_str().filter(|host| !host.is_empty()) {
                Some(host) if path_part.is_empty() => host.to_string(),
                Some(host) => format!("{host}/{path_part}"),
                None => path_part.to_string(),
            }
        };
        let path = path.trim_end_matches('/').to_string();

        // Repeated keys keep the last value.
        let query_params = parsed
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        ParsedUrl {
            path: (!path.is_empty()).then_some(path),
            query_params,
        }
    }
}

/// Splits `scheme://rest?query` by hand for input the URL grammar rejects,
/// e.g. a custom-scheme host containing a space.
fn parse_loosely(url: &str) -> ParsedUrl {
    let Some((scheme, rest)) = url.split_once("://") else {
        return ParsedUrl::default();
    };
    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };
    let location = location.split('#').next().unwrap_or_default();
    let path = if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        location.split_once('/').map(|(_, path)| path).unwrap_or_default()
    } else {
        location
    };
    let path = path.trim_matches(|c: char| c == '/' || c.is_whitespace());

    let query_params = query
        .map(|query| query.split('#').next().unwrap_or_default())
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    ParsedUrl {
        path: (!path.is_empty()).then(|| path.to_string()),
        query_params,
    }
}

/// Decodes `url` with [`StandardUrlParser`].
pub fn decode(url: &str) -> Option<DeepLink> {
    decode_with(&StandardUrlParser, url)
}

/// Decodes `url` with a caller-provided parser.
pub fn decode_with<P: UrlParser + ?Sized>(parser: &P, url: &str) -> Option<DeepLink> {
    let ParsedUrl { path, query_params } = parser.parse(url);
    let path = path?;
    let route = internal_route_for(&path)
        .map(str::to_string)
        .unwrap_or(path);
    Some(DeepLink {
        route,
        params: query_params,
    })
}

/// Builds an external `bebeagua://` URL for an internal route.
pub fn encode(route: &str, params: Option<&BTreeMap<String, String>>) -> String {
    let segment = external_path_for(route)
        .unwrap_or_else(|| route.strip_prefix('/').unwrap_or(route));

    match params.filter(|params| !params.is_empty()) {
        Some(params) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            format!("{DEEP_LINK_PREFIX}{segment}?{query}")
        }
        None => format!("{DEEP_LINK_PREFIX}{segment}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{ParsedUrl, StandardUrlParser, UrlParser};

    fn parse(url: &str) -> ParsedUrl {
        StandardUrlParser.parse(url)
    }

    #[test]
    fn custom_scheme_uses_host_as_path() {
        let parsed = parse("bebeagua://home?action=add-glass");
        assert_eq!(parsed.path.as_deref(), Some("home"));
        assert_eq!(
            parsed.query_params.get("action").map(String::as_str),
            Some("add-glass")
        );
    }

    #[test]
    fn custom_scheme_joins_nested_segments() {
        assert_eq!(parse("bebeagua://stats/today").path.as_deref(), Some("stats/today"));
        assert_eq!(parse("bebeagua://config/").path.as_deref(), Some("config"));
    }

    #[test]
    fn https_prefix_uses_url_path() {
        assert_eq!(parse("https://bebeagua.app/stats").path.as_deref(), Some("stats"));
        assert_eq!(parse("https://bebeagua.app/").path, None);
    }

    #[test]
    fn unparseable_or_empty_urls_have_no_path() {
        assert_eq!(parse("invalid-url").path, None);
        assert_eq!(parse("").path, None);
        assert_eq!(parse("bebeagua://").path, None);
    }

    #[test]
    fn host_with_space_still_yields_a_path() {
        let parsed = parse("bebeagua://stats today?action=add-glass");
        assert_eq!(parsed.path.as_deref(), Some("stats today"));
        assert_eq!(parsed.query_params["action"], "add-glass");

        assert_eq!(
            parse("https://bebeagua app/stats").path.as_deref(),
            Some("stats")
        );
        assert_eq!(parse("bebeagua:// ?x=1").path, None);
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let parsed = parse("bebeagua://home?note=hola%20mundo&x=a+b");
        assert_eq!(parsed.query_params["note"], "hola mundo");
        assert_eq!(parsed.query_params["x"], "a b");
    }
}
