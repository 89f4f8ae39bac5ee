//! Section appearance subcommands.

use crate::cli::AppearanceCommands;
use crate::error::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Execute an appearance subcommand.
///
/// # Errors
///
/// Returns an error if the drill file is missing or the operation fails.
pub fn execute(command: &AppearanceCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut file = super::open(db)?;

    match command {
        AppearanceCommands::Set {
            section,
            fill,
            outline,
        } => {
            let appearance = file.upsert_section_appearance(section, fill, outline)?;
            if json {
                println!("{}", serde_json::to_string(&appearance)?);
            } else {
                println!(
                    "Set {} colors: fill {}, outline {}",
                    appearance.section.bold(),
                    appearance.fill_color,
                    appearance.outline_color
                );
            }
        }

        AppearanceCommands::List => {
            let appearances = file.list_section_appearances()?;
            if json {
                println!("{}", serde_json::to_string(&appearances)?);
            } else if appearances.is_empty() {
                println!("No section overrides.");
            } else {
                for appearance in &appearances {
                    println!(
                        "{:<16} fill {}  outline {}",
                        appearance.section.bold(),
                        appearance.fill_color,
                        appearance.outline_color
                    );
                }
            }
        }
    }

    Ok(())
}
