//! Create a new drill file.

use crate::error::{Error, Result};
use crate::storage::DrillFile;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    path: PathBuf,
}

/// Execute the init command.
///
/// Creates the drill file (schema, history tables, triggers) at the
/// resolved path. Refuses to overwrite an existing file unless `--force`.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be
/// created.
pub fn execute(db: Option<&PathBuf>, force: bool, json: bool) -> Result<()> {
    let path = super::resolve_db_path(db)?;

    if path.exists() {
        if !force {
            return Err(Error::AlreadyInitialized { path });
        }
        fs::remove_file(&path)?;
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Opening applies the schema and installs the triggers.
    DrillFile::open(&path)?;

    if json {
        let payload = serde_json::to_string(&InitOutput { path })?;
        println!("{payload}");
    } else {
        println!("Initialized drill file at {}", path.display());
    }

    Ok(())
}
