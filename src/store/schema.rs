// src/store/schema.rs
//
// Catalog schema initialization and inspection
//
// PRINCIPLES:
// - Single embedded schema file, applied as one batch
// - Idempotent: every statement is CREATE TABLE IF NOT EXISTS
// - No automatic migrations

use rusqlite::Connection;

use crate::error::{CatalogError, CatalogResult};

/// Create the four catalog tables.
///
/// Safe to call multiple times (idempotent).
pub fn create_tables(conn: &Connection) -> CatalogResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| CatalogError::Other(format!("Failed to apply catalog schema: {}", e)))?;

    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check against the live catalog.
pub fn verify_integrity(conn: &Connection) -> CatalogResult<()> {
    let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if result != "ok" {
        return Err(CatalogError::Other(format!(
            "Catalog integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

/// Get catalog statistics
///
/// Returns useful info for debugging and monitoring
pub fn collect_stats(conn: &Connection) -> CatalogResult<StoreStats> {
    let page_count: i64 = conn.query_row("PRAGMA page_count", [], |row| row.get(0))?;

    let page_size: i64 = conn.query_row("PRAGMA page_size", [], |row| row.get(0))?;

    let size_bytes = page_count * page_size;

    // Row counts for the catalog tables
    let content_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM content", [], |row| row.get(0))
        .unwrap_or(0);

    let episode_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM episodes", [], |row| row.get(0))
        .unwrap_or(0);

    let cast_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM cast_members", [], |row| row.get(0))
        .unwrap_or(0);

    let crew_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM crew_members", [], |row| row.get(0))
        .unwrap_or(0);

    Ok(StoreStats {
        size_bytes,
        page_count,
        page_size,
        content_count,
        episode_count,
        cast_count,
        crew_count,
    })
}

/// Catalog statistics
#[derive(Debug)]
pub struct StoreStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub content_count: i64,
    pub episode_count: i64,
    pub cast_count: i64,
    pub crew_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();

        create_tables(&conn).unwrap();

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 4, "Expected 4 tables, got {}", table_count);
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Initialize twice
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 4);
    }

    #[test]
    fn test_kind_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO content (title, year, genre, rating, poster_url, banner_url, kind, duration, overview, streaming_url)
             VALUES ('X', 2020, 'Drama', '7.0', '', '', 'documentary', '1h', '', '')",
            [],
        );

        assert!(result.is_err(), "kind CHECK constraint should have rejected 'documentary'");
    }

    #[test]
    fn test_dependent_inserts_not_blocked() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        // Foreign keys are declared but the pragma stays off, so a
        // dangling episode insert goes through.
        conn.execute(
            "INSERT INTO episodes (content_id, episode_number, title, url) VALUES (999, 1, 'E1', 'u')",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_stats_on_empty_catalog() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let stats = collect_stats(&conn).unwrap();

        assert!(stats.size_bytes > 0);
        assert_eq!(stats.content_count, 0);
        assert_eq!(stats.episode_count, 0);
        assert_eq!(stats.cast_count, 0);
        assert_eq!(stats.crew_count, 0);
    }

    #[test]
    fn test_integrity_check() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        verify_integrity(&conn).unwrap();
    }
}
