// src/db/migrations.rs
//
// Schema initialization and version gating.
//
// The whole version-1 schema lives in schema.sql and is embedded at compile
// time. There are no automatic data migrations: a database from a newer or
// older schema is refused with an explicit error instead of being rewritten
// in place.

use crate::error::{PhotoError, PhotoResult};
use rusqlite::Connection;

/// Schema version this build reads and writes
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Bring a database up to the current schema. Idempotent: a fresh file gets
/// the embedded schema applied, an already-initialized one is left alone,
/// and any version mismatch is an error.
pub fn initialize_database(conn: &Connection) -> PhotoResult<()> {
    match get_schema_version(conn)? {
        0 => {
            conn.execute_batch(include_str!("../../schema.sql"))
                .map_err(|e| PhotoError::Other(format!("Failed to apply initial schema: {}", e)))?;
            set_schema_version(conn, CURRENT_SCHEMA_VERSION)
        }
        v if v == CURRENT_SCHEMA_VERSION => Ok(()),
        v if v < CURRENT_SCHEMA_VERSION => Err(PhotoError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            v, CURRENT_SCHEMA_VERSION
        ))),
        v => Err(PhotoError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            v, CURRENT_SCHEMA_VERSION
        ))),
    }
}

/// Version 0 means a database this crate has never touched
fn get_schema_version(conn: &Connection) -> PhotoResult<i32> {
    let versions_table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !versions_table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })?;

    Ok(version.unwrap_or(0))
}

fn set_schema_version(conn: &Connection, version: i32) -> PhotoResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;

    Ok(())
}

/// Run SQLite's own integrity check and surface anything it reports
pub fn verify_database_integrity(conn: &Connection) -> PhotoResult<()> {
    let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if verdict != "ok" {
        return Err(PhotoError::Other(format!(
            "Database integrity check failed: {}",
            verdict
        )));
    }

    Ok(())
}

/// Size and row-count figures for diagnostics
#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub photo_count: i64,
    pub tag_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> PhotoResult<DatabaseStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;
    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let count = |table: &str| -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap_or(0)
    };

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        photo_count: count("photos"),
        tag_count: count("tags"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert!(
            table_count >= 4,
            "Expected photos, tags, photo_tags and schema_version, got {}",
            table_count
        );
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_future_schema_version_refused() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (99, datetime('now'))",
            [],
        )
        .unwrap();

        let err = initialize_database(&conn).unwrap_err();
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        // Associating a tag with a photo that does not exist must fail
        let result = conn.execute(
            "INSERT INTO photo_tags (photo_id, tag_id) VALUES ('ghost', 999)",
            [],
        );

        assert!(
            result.is_err(),
            "Foreign key constraint should have been violated"
        );
    }

    #[test]
    fn test_empty_photo_id_rejected() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO photos (photo_id, title, taken_at, created_at)
             VALUES ('', 'No id', datetime('now'), datetime('now'))",
            [],
        );

        assert!(result.is_err(), "CHECK constraint should reject empty photo_id");
    }

    #[test]
    fn test_database_stats() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let stats = get_database_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.photo_count, 0);
        assert_eq!(stats.tag_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
