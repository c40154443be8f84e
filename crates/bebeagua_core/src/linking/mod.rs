//! `bebeagua://` deep links.
//!
//! # Responsibility
//! - Map external URLs to internal routes and back (`codec`).
//! - Turn incoming URLs into domain actions and navigation (`dispatcher`).
//!
//! # Invariants
//! - Unknown paths pass through unchanged in both directions.
//! - Unparseable URLs are ignored without surfacing an error.

pub mod codec;
pub mod dispatcher;
pub mod route;

pub use codec::{
    decode, decode_with, encode, DeepLink, ParsedUrl, StandardUrlParser, UrlParser,
    DEEP_LINK_PREFIX,
};
pub use dispatcher::{
    DeepLinkDispatcher, DeepLinkHandler, LinkOutcome, LinkSource, Navigator, Subscription,
    ACTION_ADD_GLASS, ACTION_PARAM,
};
pub use route::{external_path_for, internal_route_for, DEFAULT_ROUTE, ROUTE_TABLE};
