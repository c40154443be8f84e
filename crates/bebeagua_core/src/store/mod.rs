//! Key/value preference storage contracts and implementations.
//!
//! # Responsibility
//! - Define the opaque `get/set/remove` capability used by every stateful
//!   component in core.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - Keys and values are UTF-8 strings; values are stored verbatim.
//! - No cross-call coordination: concurrent writers to one key race and the
//!   last write to land wins.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryPreferenceStore;
pub use sqlite::SqlitePreferenceStore;

/// Persisted tri-state dark-mode key (`"true"`, `"false"`, absent = system).
pub const DARK_MODE_KEY: &str = "@bebe_agua:dark_mode";
/// Marker key whose presence means onboarding was already shown.
pub const TUTORIAL_SEEN_KEY: &str = "@bebe_agua:tutorial_seen";
/// Whitelisted reducer state blob (`water`, `theme`, `notification`, `user`).
pub const PERSISTED_STATE_KEY: &str = "persist:root";

pub type StoreResult<T> = Result<T, StoreError>;

/// Preference storage error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Backend refused the operation (lock poisoned, host storage failure).
    Unavailable(String),
    /// Stored value could not be decoded into the expected shape.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "preference store unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted preference: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Opaque key/value persistence capability.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
