//! Trigger-based undo/redo history engine.
//!
//! Every tracked table gets three row-level triggers that capture a
//! fully-formed inverse SQL statement into the undo log, tagged with the
//! current group number from the stats table. Collaborators delineate
//! logical user actions by calling [`increment_undo_group`]; the executors
//! replay the newest group of one log while the (mode-switched) triggers
//! record the opposite direction into the other log.
//!
//! The three metadata tables (`history_undo`, `history_redo`,
//! `history_stats`) are part of the on-disk file format.

use crate::error::{Error, Result};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Undo log table name (on-disk contract).
pub const UNDO_TABLE: &str = "history_undo";
/// Redo log table name (on-disk contract).
pub const REDO_TABLE: &str = "history_redo";
/// History stats singleton table name (on-disk contract).
pub const STATS_TABLE: &str = "history_stats";

/// Default retention window, in undo groups, set when the stats row is
/// first created. Collaborators may raise it via [`set_group_limit`].
pub const DEFAULT_GROUP_LIMIT: i64 = 100;

/// Which history log an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryKind {
    Undo,
    Redo,
}

impl HistoryKind {
    const fn table(self) -> &'static str {
        match self {
            Self::Undo => UNDO_TABLE,
            Self::Redo => REDO_TABLE,
        }
    }

    const fn group_column(self) -> &'static str {
        match self {
            Self::Undo => "cur_undo_group",
            Self::Redo => "cur_redo_group",
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

/// Result of a [`perform_undo`] or [`perform_redo`] call.
///
/// Statement-level failures are reported here rather than as `Err`: the
/// caller (UI, CLI) displays them without crashing. An empty history is a
/// successful no-op, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// True if the whole group replayed (or there was nothing to replay).
    pub success: bool,
    /// The inverse statements fetched for the group, in replay order.
    pub sql_statements: Vec<String>,
    /// Distinct tables touched by the replayed statements.
    pub table_names: BTreeSet<String>,
    /// Failure message when `success` is false.
    pub error: Option<String>,
}

impl HistoryResponse {
    fn empty() -> Self {
        Self {
            success: true,
            sql_statements: Vec::new(),
            table_names: BTreeSet::new(),
            error: None,
        }
    }
}

/// The singleton row of the stats table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistoryStats {
    /// Group number the undo triggers are currently tagging entries with.
    pub cur_undo_group: i64,
    /// Group number the redo triggers are currently tagging entries with.
    pub cur_redo_group: i64,
    /// Maximum retained undo groups; non-positive disables retention.
    pub group_limit: i64,
}

/// Create the undo/redo/stats tables if they don't exist.
///
/// Idempotent: an existing stats row (and its configured `group_limit`) is
/// never overwritten, so retention configuration survives reopens.
///
/// # Errors
///
/// Returns an error if the DDL fails. This is fatal for the database.
pub fn create_history_tables(conn: &Connection) -> Result<()> {
    let log_ddl = |table: &str| {
        format!(
            r#"CREATE TABLE IF NOT EXISTS {table} (
    "sequence" INTEGER PRIMARY KEY,
    "history_group" INTEGER NOT NULL,
    "sql" TEXT NOT NULL
);"#
        )
    };

    conn.execute_batch(&log_ddl(UNDO_TABLE))?;
    conn.execute_batch(&log_ddl(REDO_TABLE))?;
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {STATS_TABLE} (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            cur_undo_group INTEGER NOT NULL,
            cur_redo_group INTEGER NOT NULL,
            group_limit INTEGER NOT NULL
        );"
    ))?;
    conn.execute(
        &format!(
            "INSERT OR IGNORE INTO {STATS_TABLE}
             (id, cur_undo_group, cur_redo_group, group_limit) VALUES (1, 0, 0, ?1)"
        ),
        [DEFAULT_GROUP_LIMIT],
    )?;

    Ok(())
}

/// Register a table for undo/redo tracking.
///
/// Installs the three row-level triggers (`<table>_it`, `<table>_ut`,
/// `<table>_dt`) in normal undo mode, where any capture also clears the
/// redo log. Must be re-run if the table's column set changes.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the table does not exist, or a
/// database error if trigger creation fails.
pub fn create_undo_triggers(conn: &Connection, table: &str) -> Result<()> {
    info!(table, "installing undo triggers");
    create_triggers(conn, table, HistoryKind::Undo, true)
}

/// Remove the history triggers from a table, disabling tracking.
///
/// # Errors
///
/// Returns an error if the drop statements fail.
pub fn drop_undo_triggers(conn: &Connection, table: &str) -> Result<()> {
    for suffix in ["_it", "_ut", "_dt"] {
        conn.execute_batch(&format!(
            "DROP TRIGGER IF EXISTS {};",
            quote_ident(&format!("{table}{suffix}"))
        ))?;
    }
    Ok(())
}

/// Close the current undo batch and open the next one.
///
/// Sets the undo triggers' group counter to `MAX(history_group) + 1` of the
/// undo log, so advancing with no intervening mutations is a harmless no-op
/// (the counter lands on the same value). Also the retention enforcement
/// point: once the number of distinct groups exceeds `group_limit`, the
/// oldest excess groups are deleted. A lowered limit therefore takes effect
/// lazily, on the next advance.
///
/// # Errors
///
/// Returns an error if the stats table cannot be read or updated.
pub fn increment_undo_group(conn: &Connection) -> Result<i64> {
    increment_group(conn, HistoryKind::Undo)
}

/// Undo the most recent group of tracked mutations.
///
/// Replays the newest undo group's inverse statements (reverse capture
/// order) inside one transaction. Because replaying is itself a set of
/// tracked mutations, the triggers — switched to redo mode for the affected
/// tables — record the redo entries automatically. A statement failure
/// rolls the whole group back and is reported in the response, not thrown.
///
/// An empty undo log is a successful no-op.
///
/// # Errors
///
/// Returns `Err` only for infrastructure failures (e.g. the metadata tables
/// are missing); replay failures come back as `success: false`.
pub fn perform_undo(conn: &mut Connection) -> Result<HistoryResponse> {
    execute_history_action(conn, HistoryKind::Undo)
}

/// Redo the most recently undone group.
///
/// Exact mirror of [`perform_undo`]: replays the newest redo group (which,
/// being captured during a reverse-order undo replay, comes back out in
/// forward chronological order) while the triggers — in undo mode with
/// redo-clearing disabled — rebuild the undo entries.
///
/// # Errors
///
/// Returns `Err` only for infrastructure failures; replay failures come
/// back as `success: false`.
pub fn perform_redo(conn: &mut Connection) -> Result<HistoryResponse> {
    execute_history_action(conn, HistoryKind::Redo)
}

/// Delete all undo and redo history and reset the group counters.
///
/// Called on schema migration events: stored inverse SQL may reference
/// columns or tables that no longer exist afterwards.
///
/// # Errors
///
/// Returns an error if the deletes fail.
pub fn clear_history(conn: &Connection) -> Result<()> {
    conn.execute(&format!("DELETE FROM {UNDO_TABLE}"), [])?;
    conn.execute(&format!("DELETE FROM {REDO_TABLE}"), [])?;
    refresh_current_groups(conn)?;
    info!("history cleared");
    Ok(())
}

/// Drop the newest redo group without replaying it.
///
/// For callers that had to roll back a failed compound action and must not
/// leave its redo entries reachable.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_most_recent_redo(conn: &Connection) -> Result<()> {
    let max_group: Option<i64> = conn.query_row(
        &format!("SELECT MAX(\"history_group\") FROM {REDO_TABLE}"),
        [],
        |row| row.get(0),
    )?;
    if let Some(group) = max_group {
        conn.execute(
            &format!("DELETE FROM {REDO_TABLE} WHERE \"history_group\" = ?1"),
            [group],
        )?;
    }
    Ok(())
}

/// Read the stats singleton.
///
/// # Errors
///
/// Returns an error if the stats row is missing or unreadable.
pub fn history_stats(conn: &Connection) -> Result<HistoryStats> {
    let stats = conn.query_row(
        &format!("SELECT cur_undo_group, cur_redo_group, group_limit FROM {STATS_TABLE}"),
        [],
        |row| {
            Ok(HistoryStats {
                cur_undo_group: row.get(0)?,
                cur_redo_group: row.get(1)?,
                group_limit: row.get(2)?,
            })
        },
    )?;
    Ok(stats)
}

/// The group number undo triggers are currently tagging entries with.
///
/// # Errors
///
/// Returns an error if the stats row is missing.
pub fn get_current_undo_group(conn: &Connection) -> Result<i64> {
    Ok(history_stats(conn)?.cur_undo_group)
}

/// The configured retention window.
///
/// # Errors
///
/// Returns an error if the stats row is missing.
pub fn group_limit(conn: &Connection) -> Result<i64> {
    Ok(history_stats(conn)?.group_limit)
}

/// Reconfigure the retention window.
///
/// Only writes the stats row: raising the limit needs no other action, and
/// lowering it prunes nothing until the next group advance (deliberate —
/// pruning lives on the write path, not the configuration path).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_group_limit(conn: &Connection, limit: i64) -> Result<()> {
    conn.execute(
        &format!("UPDATE {STATS_TABLE} SET group_limit = ?1"),
        [limit],
    )?;
    Ok(())
}

// ── internals ─────────────────────────────────────────────────

/// Double-quote an identifier, doubling any embedded quotes, so reserved
/// words (`order`, `group`, `select`, `from`) are always safe.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape text for embedding inside a single-quoted SQL string literal.
fn escape_literal(text: &str) -> String {
    text.replace('\'', "''")
}

fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
}

/// Install the insert/update/delete capture triggers for one table.
///
/// `kind` selects which log the triggers write to. `clear_redo` (only
/// meaningful in undo mode) makes every capture clear the redo log — the
/// redo-invalidation rule for fresh user actions. It is disabled while a
/// redo replay is rebuilding the undo log.
fn create_triggers(
    conn: &Connection,
    table: &str,
    kind: HistoryKind,
    clear_redo: bool,
) -> Result<()> {
    let columns = table_columns(conn, table)?;
    if columns.is_empty() {
        return Err(Error::InvalidArgument(format!("no such table: {table}")));
    }

    let qtable = quote_ident(table);
    // The table reference inside the captured statement text, escaped for
    // the enclosing single-quoted literal.
    let lit_table = escape_literal(&qtable);
    let log_table = kind.table();
    let group_select = format!("(SELECT {} FROM {STATS_TABLE})", kind.group_column());
    let side_effect = if kind == HistoryKind::Undo && clear_redo {
        format!("DELETE FROM {REDO_TABLE};\n    UPDATE {STATS_TABLE} SET \"cur_redo_group\" = 0;")
    } else {
        String::new()
    };

    // Replace any previous set so mode switches and column changes take.
    drop_undo_triggers(conn, table)?;

    // INSERT: inverse is a rowid-targeted DELETE.
    let insert_trigger = format!(
        "CREATE TRIGGER IF NOT EXISTS {name} AFTER INSERT ON {qtable} BEGIN
    INSERT INTO {log_table} (\"sequence\", \"history_group\", \"sql\")
        VALUES (NULL, {group_select}, 'DELETE FROM {lit_table} WHERE rowid='||new.rowid);
    {side_effect}
END;",
        name = quote_ident(&format!("{table}_it")),
    );
    conn.execute_batch(&insert_trigger)?;

    // UPDATE: inverse restores every column's prior value in one statement.
    // quote() renders old values as self-contained SQL literals (strings,
    // blobs and NULLs included).
    let set_clause = columns
        .iter()
        .map(|column| {
            let qcolumn = quote_ident(column);
            format!("{}='||quote(old.{qcolumn})||'", escape_literal(&qcolumn))
        })
        .collect::<Vec<_>>()
        .join(",");
    let update_trigger = format!(
        "CREATE TRIGGER IF NOT EXISTS {name} AFTER UPDATE ON {qtable} BEGIN
    INSERT INTO {log_table} (\"sequence\", \"history_group\", \"sql\")
        VALUES (NULL, {group_select}, 'UPDATE {lit_table} SET {set_clause} WHERE rowid='||old.rowid);
    {side_effect}
END;",
        name = quote_ident(&format!("{table}_ut")),
    );
    conn.execute_batch(&update_trigger)?;

    // DELETE: inverse re-inserts the row with all original values. Columns
    // include any INTEGER PRIMARY KEY, so row identity survives the
    // round-trip and later inverse statements keep pointing at it.
    let column_list = columns
        .iter()
        .map(|column| escape_literal(&quote_ident(column)))
        .collect::<Vec<_>>()
        .join(",");
    let value_list = columns
        .iter()
        .map(|column| format!("'||quote(old.{})||'", quote_ident(column)))
        .collect::<Vec<_>>()
        .join(",");
    let delete_trigger = format!(
        "CREATE TRIGGER IF NOT EXISTS {name} BEFORE DELETE ON {qtable} BEGIN
    INSERT INTO {log_table} (\"sequence\", \"history_group\", \"sql\")
        VALUES (NULL, {group_select}, 'INSERT INTO {lit_table} ({column_list}) VALUES ({value_list})');
    {side_effect}
END;",
        name = quote_ident(&format!("{table}_dt")),
    );
    conn.execute_batch(&delete_trigger)?;

    Ok(())
}

/// Advance a log's group counter to `MAX(history_group) + 1` and enforce
/// the retention window on that log.
fn increment_group(conn: &Connection, kind: HistoryKind) -> Result<i64> {
    let log_table = kind.table();
    let max_group: i64 = conn.query_row(
        &format!("SELECT COALESCE(MAX(\"history_group\"), 0) FROM {log_table}"),
        [],
        |row| row.get(0),
    )?;
    let new_group = max_group + 1;
    conn.execute(
        &format!(
            "UPDATE {STATS_TABLE} SET \"{}\" = ?1",
            kind.group_column()
        ),
        [new_group],
    )?;

    let group_limit: i64 = conn.query_row(
        &format!("SELECT group_limit FROM {STATS_TABLE}"),
        [],
        |row| row.get(0),
    )?;
    if group_limit > 0 {
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT \"history_group\" FROM {log_table} ORDER BY \"history_group\""
        ))?;
        let groups = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let limit = usize::try_from(group_limit).unwrap_or(usize::MAX);
        if groups.len() > limit {
            let excess = &groups[..groups.len() - limit];
            debug!(count = excess.len(), log = log_table, "pruning oldest history groups");
            let mut delete = conn.prepare(&format!(
                "DELETE FROM {log_table} WHERE \"history_group\" = ?1"
            ))?;
            for group in excess {
                delete.execute([group])?;
            }
        }
    }

    Ok(new_group)
}

/// Reset both current-group counters to `MAX(history_group) + 1` of their
/// logs, keeping the stored counters in lockstep with the logs' contents.
fn refresh_current_groups(conn: &Connection) -> Result<()> {
    for kind in [HistoryKind::Undo, HistoryKind::Redo] {
        let max_group: i64 = conn.query_row(
            &format!(
                "SELECT COALESCE(MAX(\"history_group\"), 0) FROM {}",
                kind.table()
            ),
            [],
            |row| row.get(0),
        )?;
        conn.execute(
            &format!(
                "UPDATE {STATS_TABLE} SET \"{}\" = ?1",
                kind.group_column()
            ),
            [max_group + 1],
        )?;
    }
    Ok(())
}

/// Re-point the capture triggers of the given tables at the `kind` log.
fn switch_trigger_mode(
    conn: &Connection,
    kind: HistoryKind,
    clear_redo: bool,
    tables: &BTreeSet<String>,
) -> Result<()> {
    if tables.is_empty() {
        return Ok(());
    }

    let in_list = tables
        .iter()
        .map(|table| format!("'{}'", escape_literal(table)))
        .collect::<Vec<_>>()
        .join(",");
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT tbl_name FROM sqlite_master WHERE type = 'trigger'
         AND (name LIKE '%$_it' ESCAPE '$'
           OR name LIKE '%$_ut' ESCAPE '$'
           OR name LIKE '%$_dt' ESCAPE '$')
         AND tbl_name IN ({in_list})"
    ))?;
    let tracked = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    for table in &tracked {
        create_triggers(conn, table, kind, clear_redo)?;
    }
    Ok(())
}

/// Extract the first double-quoted identifier from a captured statement —
/// always the target table in trigger-generated SQL.
fn first_quoted_ident(sql: &str) -> Option<String> {
    let start = sql.find('"')? + 1;
    let mut name = String::new();
    let mut chars = sql[start..].chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                chars.next();
                name.push('"');
            } else {
                return Some(name);
            }
        } else {
            name.push(c);
        }
    }
    None
}

fn execute_history_action(conn: &mut Connection, kind: HistoryKind) -> Result<HistoryResponse> {
    let log_table = kind.table();
    let max_group: Option<i64> = conn.query_row(
        &format!("SELECT MAX(\"history_group\") FROM {log_table}"),
        [],
        |row| row.get(0),
    )?;
    let Some(group) = max_group else {
        debug!("nothing to {}", kind.verb());
        return Ok(HistoryResponse::empty());
    };

    // Each log is written in reverse of its desired replay order, so DESC
    // yields reverse-chronological replay for undo and forward-chronological
    // replay for redo.
    let mut stmt = conn.prepare(&format!(
        "SELECT \"sql\" FROM {log_table} WHERE \"history_group\" = ?1 ORDER BY \"sequence\" DESC"
    ))?;
    let sql_statements = stmt
        .query_map([group], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    drop(stmt);
    if sql_statements.is_empty() {
        return Ok(HistoryResponse::empty());
    }

    let table_names: BTreeSet<String> = sql_statements
        .iter()
        .filter_map(|sql| first_quoted_ident(sql))
        .collect();

    debug!(
        group,
        statements = sql_statements.len(),
        "performing {}",
        kind.verb()
    );

    // Foreign keys off for the replay: inverse statements may re-create
    // parents after children within the group. The pragma is a no-op inside
    // a transaction, so it brackets the transaction instead.
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    let replayed = replay_group(conn, kind, group, &sql_statements, &table_names);
    conn.pragma_update(None, "foreign_keys", "ON")?;

    match replayed {
        Ok(()) => Ok(HistoryResponse {
            success: true,
            sql_statements,
            table_names,
            error: None,
        }),
        Err(Error::Database(err)) => {
            warn!(group, %err, "{} failed, rolled back", kind.verb());
            Ok(HistoryResponse {
                success: false,
                sql_statements,
                table_names,
                error: Some(err.to_string()),
            })
        }
        Err(other) => Err(other),
    }
}

/// Replay one group inside a single transaction. Any failure rolls back the
/// replayed statements, the consumed-entry deletion, and the trigger mode
/// switches together, leaving the database exactly as before the call.
fn replay_group(
    conn: &mut Connection,
    kind: HistoryKind,
    group: i64,
    sql_statements: &[String],
    table_names: &BTreeSet<String>,
) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    match kind {
        HistoryKind::Undo => {
            // Undo replay must land in a fresh redo group; this is also the
            // redo log's retention enforcement point.
            increment_group(&tx, HistoryKind::Redo)?;
            switch_trigger_mode(&tx, HistoryKind::Redo, false, table_names)?;
        }
        HistoryKind::Redo => {
            // Rebuild undo entries without wiping the remaining redo groups.
            switch_trigger_mode(&tx, HistoryKind::Undo, false, table_names)?;
        }
    }

    for sql in sql_statements {
        tx.execute(sql, [])?;
    }

    tx.execute(
        &format!("DELETE FROM {} WHERE \"history_group\" = ?1", kind.table()),
        [group],
    )?;
    refresh_current_groups(&tx)?;
    switch_trigger_mode(&tx, HistoryKind::Undo, true, table_names)?;

    tx.commit()?;
    Ok(())
}
