use rusqlite::Connection;
use skillrank_core::db::migrations::latest_version;
use skillrank_core::db::{open_db, open_db_in_memory, open_from_config, DbError};
use skillrank_core::DatabaseConfig;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "people");
    assert_table_exists(&conn, "skills");
    assert_table_exists(&conn, "rankings");
    assert_table_exists(&conn, "messages");
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("skillrank.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO people (name) VALUES ('Gene Showrama');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let people: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(people, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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
fn open_from_config_selects_file_or_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("configured.db");

    let file_conn = open_from_config(&DatabaseConfig {
        path: Some(path.clone()),
    })
    .unwrap();
    assert_eq!(schema_version(&file_conn), latest_version());
    assert!(path.exists());

    let memory_conn = open_from_config(&DatabaseConfig::default()).unwrap();
    assert_eq!(schema_version(&memory_conn), latest_version());
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
