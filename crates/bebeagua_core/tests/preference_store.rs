use bebeagua_core::db::migrations::latest_version;
use bebeagua_core::db::{open_db, open_db_in_memory, DbError};
use bebeagua_core::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore, StoreError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "preferences");
}

#[test]
fn opening_same_database_twice_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.sqlite3");

    let first = open_db(&path).unwrap();
    SqlitePreferenceStore::new(&first)
        .set("@bebe_agua:dark_mode", "true")
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let value = SqlitePreferenceStore::new(&second)
        .get("@bebe_agua:dark_mode")
        .unwrap();
    assert_eq!(value.as_deref(), Some("true"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn sqlite_store_upserts_and_removes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqlitePreferenceStore::new(&conn);

    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn sqlite_store_surfaces_db_errors() {
    let conn = Connection::open_in_memory().unwrap();
    let store = SqlitePreferenceStore::new(&conn);

    let err = store.get("k").unwrap_err();
    assert!(matches!(err, StoreError::Db(DbError::Sqlite(_))));
}

#[test]
fn stores_are_usable_through_references() {
    let store = MemoryPreferenceStore::new();
    write_through(&store);
    assert_eq!(store.get("via-ref").unwrap().as_deref(), Some("ok"));
}

fn write_through(store: impl PreferenceStore) {
    store.set("via-ref", "ok").unwrap();
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
