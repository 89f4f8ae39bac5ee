//! Command implementations.

pub mod appearance;
pub mod completions;
pub mod hist;
pub mod init;
pub mod marcher;
pub mod page;
pub mod version;

use crate::error::{Error, Result};
use crate::storage::DrillFile;
use std::path::PathBuf;

/// Default drill file location in the platform data directory.
pub(crate) fn default_db_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "drillfile")
        .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
    Ok(dirs.data_dir().join("default.drill"))
}

pub(crate) fn resolve_db_path(db: Option<&PathBuf>) -> Result<PathBuf> {
    db.map_or_else(default_db_path, |path| Ok(path.clone()))
}

/// Open an existing drill file; `dfl init` must have created it first.
pub(crate) fn open(db: Option<&PathBuf>) -> Result<DrillFile> {
    let path = resolve_db_path(db)?;
    if !path.exists() {
        return Err(Error::NotInitialized);
    }
    DrillFile::open(&path)
}
