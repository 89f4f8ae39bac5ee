//! Database migrations embedded at compile time.
//!
//! Migrations are sourced from `/migrations/` at the repo root and
//! embedded into the binary using `include_str!`. This ensures the
//! binary is self-contained with no runtime file dependencies.
//!
//! Applying any migration clears the undo/redo history: stored inverse
//! SQL may reference columns that the migration just changed. The open
//! path reinstalls the capture triggers afterwards.

use crate::error::Result;
use crate::storage::history;
use rusqlite::Connection;
use tracing::{info, warn};

/// A single migration with version identifier and SQL content.
struct Migration {
    version: &'static str,
    sql: &'static str,
}

/// All migrations in order, embedded at compile time.
///
/// Version names match the SQL filenames (without .sql extension).
/// The `schema_migrations` table tracks which have been applied.
const MIGRATIONS: &[Migration] = &[Migration {
    version: "001_add_marcher_page_notes",
    sql: include_str!("../../migrations/001_add_marcher_page_notes.sql"),
}];

/// Run all pending migrations on the database.
///
/// Migrations are applied in order; already-applied versions (tracked in
/// the `schema_migrations` table) are skipped. Returns the number of
/// migrations applied this run. When that is non-zero the history logs
/// are cleared, since their stored SQL may no longer replay.
///
/// # Errors
///
/// Returns an error if a migration fails to apply. ALTER TABLE errors
/// for duplicate columns are tolerated (logged as warnings) since the
/// base schema may already carry those columns.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    let applied: std::collections::HashSet<String> = conn
        .prepare("SELECT version FROM schema_migrations")?
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<_>>()?;

    let mut applied_now = 0;
    for migration in MIGRATIONS {
        if applied.contains(migration.version) {
            continue;
        }

        info!(version = migration.version, "Applying migration");

        if let Err(e) = conn.execute_batch(migration.sql) {
            if e.to_string().contains("duplicate column name") {
                warn!(
                    version = migration.version,
                    "Migration partially applied (columns exist), marking complete"
                );
            } else {
                return Err(e.into());
            }
        }

        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![migration.version, chrono::Utc::now().timestamp_millis()],
        )?;
        applied_now += 1;

        info!(version = migration.version, "Migration complete");
    }

    if applied_now > 0 {
        // Inverse SQL captured against the old schema can't be trusted.
        history::clear_history(conn)?;
    }

    Ok(applied_now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::apply_schema;

    #[test]
    fn test_migrations_compile() {
        // Verifies that all include_str! paths are valid.
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_run_migrations_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        let applied = run_migrations(&conn).unwrap();
        assert_eq!(applied, MIGRATIONS.len());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count as usize, MIGRATIONS.len());
    }

    #[test]
    fn test_run_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        run_migrations(&conn).unwrap();
        let second = run_migrations(&conn).unwrap();
        assert_eq!(second, 0);
    }

    #[test]
    fn test_migration_clears_history() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        crate::storage::schema::install_undo_triggers(&conn).unwrap();

        conn.execute(
            "INSERT INTO pages (counts, created_at, updated_at) VALUES (8, 't', 't')",
            [],
        )
        .unwrap();
        history::increment_undo_group(&conn).unwrap();

        run_migrations(&conn).unwrap();
        let entries: i64 = conn
            .query_row("SELECT COUNT(*) FROM history_undo", [], |row| row.get(0))
            .unwrap();
        assert_eq!(entries, 0);
    }
}
