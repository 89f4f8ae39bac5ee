//! Marcher subcommands.

use crate::cli::MarcherCommands;
use crate::error::{Error, Result};
use crate::storage::sqlite::NewMarcher;
use colored::Colorize;
use std::path::PathBuf;

/// Execute a marcher subcommand.
///
/// # Errors
///
/// Returns an error if the drill file is missing or the operation fails.
pub fn execute(command: &MarcherCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut file = super::open(db)?;

    match command {
        MarcherCommands::Add {
            section,
            prefix,
            order,
            count,
            name,
            year,
            notes,
        } => {
            if *count < 1 {
                return Err(Error::InvalidArgument("--count must be at least 1".into()));
            }
            if *count > 1 && name.is_some() {
                return Err(Error::InvalidArgument(
                    "--name only applies when adding a single marcher".into(),
                ));
            }

            let new_marchers: Vec<NewMarcher> = (0..*count)
                .map(|offset| NewMarcher {
                    name: name.clone(),
                    section: section.clone(),
                    year: year.clone(),
                    notes: notes.clone(),
                    drill_prefix: prefix.clone(),
                    drill_order: order + offset,
                })
                .collect();

            let created = file.create_marchers(&new_marchers)?;
            if json {
                println!("{}", serde_json::to_string(&created)?);
            } else {
                for marcher in &created {
                    println!(
                        "Added {} ({}) [id {}]",
                        marcher.drill_number.bold(),
                        marcher.section,
                        marcher.id
                    );
                }
            }
        }

        MarcherCommands::List => {
            let marchers = file.list_marchers()?;
            if json {
                println!("{}", serde_json::to_string(&marchers)?);
            } else if marchers.is_empty() {
                println!("No marchers.");
            } else {
                for marcher in &marchers {
                    let name = marcher.name.as_deref().unwrap_or("-");
                    println!(
                        "{:>4}  {:<6} {:<16} {}",
                        marcher.id,
                        marcher.drill_number.bold(),
                        marcher.section,
                        name
                    );
                }
            }
        }

        MarcherCommands::Update {
            id,
            name,
            section,
            year,
            notes,
        } => {
            let updated = file.update_marcher(
                *id,
                name.as_deref(),
                section.as_deref(),
                year.as_deref(),
                notes.as_deref(),
            )?;
            if json {
                println!("{}", serde_json::to_string(&updated)?);
            } else {
                println!("Updated {} [id {}]", updated.drill_number.bold(), updated.id);
            }
        }

        MarcherCommands::Remove { ids } => {
            file.delete_marchers(ids)?;
            if json {
                println!("{}", serde_json::json!({ "removed": ids }));
            } else {
                println!("Removed {} marcher(s)", ids.len());
            }
        }
    }

    Ok(())
}
