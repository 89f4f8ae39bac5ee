//! Database schema definitions.
//!
//! The complete SQLite schema for a drill file: performers (marchers),
//! pages, per-page coordinates, section appearance overrides, and a
//! utility singleton. The undo/redo metadata tables live in
//! [`super::history`]; this module wires them and the capture triggers
//! into the open path.

use crate::error::Result;
use crate::storage::history;
use rusqlite::Connection;

/// Tables whose row changes are captured into the undo log.
pub const TRACKED_TABLES: &[&str] = &[
    "marchers",
    "pages",
    "marcher_pages",
    "section_appearances",
    "utility",
];

/// The complete DDL for a drill file.
///
/// Timestamps are stored as TEXT (RFC 3339). All statements use
/// `IF NOT EXISTS` so the script is idempotent.
pub const SCHEMA_SQL: &str = r#"
-- ====================
-- Schema Version Tracking
-- ====================

CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

-- ====================
-- Core Tables
-- ====================

-- Marchers: one row per performer in the drill
CREATE TABLE IF NOT EXISTS marchers (
    id INTEGER PRIMARY KEY,
    name TEXT,
    section TEXT NOT NULL,
    year TEXT,
    notes TEXT,
    drill_prefix TEXT NOT NULL,
    drill_order INTEGER NOT NULL,
    drill_number TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (drill_prefix, drill_order)
);

-- Pages: one row per drill page (a set of counts)
CREATE TABLE IF NOT EXISTS pages (
    id INTEGER PRIMARY KEY,
    counts INTEGER NOT NULL,
    is_subset INTEGER NOT NULL DEFAULT 0 CHECK (is_subset IN (0, 1)),
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Marcher pages: the coordinate of one marcher on one page
CREATE TABLE IF NOT EXISTS marcher_pages (
    id INTEGER PRIMARY KEY,
    marcher_id INTEGER NOT NULL,
    page_id INTEGER NOT NULL,
    x REAL NOT NULL,
    y REAL NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (marcher_id) REFERENCES marchers (id),
    FOREIGN KEY (page_id) REFERENCES pages (id),
    UNIQUE (marcher_id, page_id)
);

CREATE INDEX IF NOT EXISTS idx_marcher_pages_marcher ON marcher_pages(marcher_id);
CREATE INDEX IF NOT EXISTS idx_marcher_pages_page ON marcher_pages(page_id);

-- Section appearances: per-section rendering overrides
CREATE TABLE IF NOT EXISTS section_appearances (
    id INTEGER PRIMARY KEY,
    section TEXT NOT NULL UNIQUE,
    fill_color TEXT NOT NULL,
    outline_color TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Utility: singleton row of file-level scratch state
CREATE TABLE IF NOT EXISTS utility (
    id INTEGER PRIMARY KEY CHECK (id = 0),
    last_page_counts INTEGER NOT NULL DEFAULT 8
);
"#;

/// Apply the schema to the database.
///
/// Sets pragmas, runs the DDL script, and creates the history metadata
/// tables. Idempotent; safe on every open. Trigger installation is
/// separate ([`install_undo_triggers`]) because it must run after
/// migrations, when the tracked tables' column lists are final.
///
/// # Errors
///
/// Returns an error if the SQL execution fails or pragmas cannot be set.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute("INSERT OR IGNORE INTO utility (id) VALUES (0)", [])?;

    history::create_history_tables(conn)?;

    Ok(())
}

/// Install the undo capture triggers on every tracked table.
///
/// Re-run after any migration: the triggers bake the column list in at
/// creation time.
///
/// # Errors
///
/// Returns an error if a tracked table is missing or trigger DDL fails.
pub fn install_undo_triggers(conn: &Connection) -> Result<()> {
    for table in TRACKED_TABLES {
        history::create_undo_triggers(conn, table)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                 ('marchers', 'pages', 'marcher_pages', 'section_appearances', 'utility')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_utility_singleton_seeded() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let counts: i64 = conn
            .query_row("SELECT last_page_counts FROM utility WHERE id = 0", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(counts, 8);

        // CHECK (id = 0) forbids a second row.
        let err = conn.execute("INSERT INTO utility (id) VALUES (1)", []);
        assert!(err.is_err());
    }

    #[test]
    fn test_install_undo_triggers_covers_tracked_tables() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        install_undo_triggers(&conn).unwrap();

        let triggers: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(triggers, (TRACKED_TABLES.len() * 3) as i64);
    }
}
