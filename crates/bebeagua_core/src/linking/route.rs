//! Static bidirectional route table.

/// `(external path segment, internal route)` pairs.
///
/// Each internal route appears exactly once.
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("home", "/(tabs)"),
    ("config", "/(tabs)/configuration"),
    ("stats", "/(tabs)/stats"),
    ("welcome", "/welcome"),
];

/// Route the dispatcher falls back to after in-place actions.
pub const DEFAULT_ROUTE: &str = "/(tabs)";

/// Internal route for an external path, if the table knows it.
pub fn internal_route_for(external_path: &str) -> Option<&'static str> {
    ROUTE_TABLE
        .iter()
        .find(|(external, _)| *external == external_path)
        .map(|(_, internal)| *internal)
}

/// External path for an internal route, if the table knows it.
pub fn external_path_for(internal_route: &str) -> Option<&'static str> {
    ROUTE_TABLE
        .iter()
        .find(|(_, internal)| *internal == internal_route)
        .map(|(external, _)| *external)
}
