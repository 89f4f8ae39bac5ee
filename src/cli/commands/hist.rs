//! Undo, redo, move, and history inspection commands.

use crate::cli::HistoryCommands;
use crate::error::{Error, Result};
use crate::storage::sqlite::CoordinateUpdate;
use crate::storage::HistoryResponse;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the undo command.
///
/// # Errors
///
/// Returns an error if the drill file is missing, the engine fails, or
/// the replay itself failed (so scripts get a non-zero exit).
pub fn execute_undo(db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut file = super::open(db)?;
    let response = file.undo()?;
    report("Undid", "undo", &response, json)
}

/// Execute the redo command.
///
/// # Errors
///
/// Same contract as [`execute_undo`].
pub fn execute_redo(db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut file = super::open(db)?;
    let response = file.redo()?;
    report("Redid", "redo", &response, json)
}

fn report(verb: &str, noun: &str, response: &HistoryResponse, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(response)?);
        if !response.success {
            return Err(Error::Other(format!("{noun} failed")));
        }
        return Ok(());
    }

    if !response.success {
        let message = response
            .error
            .clone()
            .unwrap_or_else(|| "unknown failure".to_string());
        return Err(Error::Other(format!("{noun} failed: {message}")));
    }

    if response.sql_statements.is_empty() {
        println!("Nothing to {noun}.");
    } else {
        let tables: Vec<&str> = response.table_names.iter().map(String::as_str).collect();
        println!(
            "{} {} statement(s) across {}",
            verb.green(),
            response.sql_statements.len(),
            tables.join(", ")
        );
    }
    Ok(())
}

/// Execute the move command (one placement update, one undo group).
///
/// # Errors
///
/// Returns an error if the placement doesn't exist.
pub fn execute_move(
    marcher_id: i64,
    page_id: i64,
    x: f64,
    y: f64,
    notes: Option<&str>,
    db: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let mut file = super::open(db)?;
    file.update_placements(&[CoordinateUpdate {
        marcher_id,
        page_id,
        x,
        y,
        notes: notes.map(String::from),
    }])?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "marcher_id": marcher_id,
                "page_id": page_id,
                "x": x,
                "y": y,
            })
        );
    } else {
        println!("Moved marcher {marcher_id} on page {page_id} to ({x}, {y})");
    }
    Ok(())
}

/// Execute a history subcommand.
///
/// # Errors
///
/// Returns an error if the drill file is missing or the stats row is
/// unreadable.
pub fn execute(command: &HistoryCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let file = super::open(db)?;

    match command {
        HistoryCommands::Status => {
            let stats = file.history_stats()?;
            let (undo_groups, redo_groups) = file.history_depth()?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "undo_groups": undo_groups,
                        "redo_groups": redo_groups,
                        "group_limit": stats.group_limit,
                    })
                );
            } else {
                println!("Undo groups: {undo_groups}");
                println!("Redo groups: {redo_groups}");
                println!("Group limit: {}", stats.group_limit);
            }
        }

        HistoryCommands::Limit { limit } => {
            file.set_group_limit(*limit)?;
            if json {
                println!("{}", serde_json::json!({ "group_limit": limit }));
            } else {
                println!("History limit set to {limit}");
            }
        }
    }

    Ok(())
}
