//! SQLite-backed preference store.
//!
//! # Invariants
//! - Connection must come from `db::open_db*` so the `preferences` table
//!   exists.
//! - `set` is an upsert; `remove` of a missing key is not an error.

use super::{PreferenceStore, StoreResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

/// Preference store over the migrated `preferences` table.
pub struct SqlitePreferenceStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for SqlitePreferenceStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at_ms)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at_ms = excluded.updated_at_ms",
            params![key, value, now_epoch_ms()],
        )?;
        debug!("event=pref_set module=store status=ok key={key}");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1", [key])?;
        debug!("event=pref_remove module=store status=ok key={key} changed={changed}");
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
