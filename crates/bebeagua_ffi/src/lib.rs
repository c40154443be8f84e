//! Flutter bridge crate for the BebeAgua core.
//!
//! Dart talks to `api` only; domain rules stay in `bebeagua_core`.

pub mod api;
