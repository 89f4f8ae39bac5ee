//! Page subcommands.

use crate::cli::PageCommands;
use crate::error::Result;
use crate::storage::sqlite::NewPage;
use colored::Colorize;
use std::path::PathBuf;

/// Execute a page subcommand.
///
/// # Errors
///
/// Returns an error if the drill file is missing or the operation fails.
pub fn execute(command: &PageCommands, db: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut file = super::open(db)?;

    match command {
        PageCommands::Add {
            counts,
            subset,
            notes,
        } => {
            // Fall back to the last page's counts, like the desktop app.
            let counts = match counts {
                Some(counts) => *counts,
                None => file.last_page_counts()?,
            };
            let created = file.create_pages(&[NewPage {
                counts,
                is_subset: *subset,
                notes: notes.clone(),
            }])?;
            if json {
                println!("{}", serde_json::to_string(&created)?);
            } else {
                println!(
                    "Added page {} ({} counts)",
                    created[0].id.to_string().bold(),
                    created[0].counts
                );
            }
        }

        PageCommands::List => {
            let pages = file.list_pages()?;
            if json {
                println!("{}", serde_json::to_string(&pages)?);
            } else if pages.is_empty() {
                println!("No pages.");
            } else {
                for page in &pages {
                    let subset = if page.is_subset { " (subset)" } else { "" };
                    println!(
                        "{:>4}  {:>3} counts{}",
                        page.id.to_string().bold(),
                        page.counts,
                        subset
                    );
                }
            }
        }

        PageCommands::Update { id, counts, notes } => {
            let updated = file.update_page(*id, *counts, notes.as_deref())?;
            if json {
                println!("{}", serde_json::to_string(&updated)?);
            } else {
                println!("Updated page {} ({} counts)", updated.id, updated.counts);
            }
        }

        PageCommands::Remove { ids } => {
            file.delete_pages(ids)?;
            if json {
                println!("{}", serde_json::json!({ "removed": ids }));
            } else {
                println!("Removed {} page(s)", ids.len());
            }
        }

        PageCommands::Coords { id } => {
            let placements = file.placements_for_page(*id)?;
            if json {
                println!("{}", serde_json::to_string(&placements)?);
            } else if placements.is_empty() {
                println!("No marchers on page {id}.");
            } else {
                for placement in &placements {
                    let marcher = file.get_marcher(placement.marcher_id)?;
                    println!(
                        "{:<6} ({:>8.2}, {:>8.2})",
                        marcher.drill_number.bold(),
                        placement.x,
                        placement.y
                    );
                }
            }
        }
    }

    Ok(())
}
