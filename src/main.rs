//! drillfile CLI entry point.

use clap::Parser;
use drillfile::cli::commands;
use drillfile::cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> drillfile::Result<()> {
    match &cli.command {
        Commands::Init { force } => commands::init::execute(cli.db.as_ref(), *force, cli.json),
        Commands::Version => commands::version::execute(cli.json),

        Commands::Marcher { command } => {
            commands::marcher::execute(command, cli.db.as_ref(), cli.json)
        }
        Commands::Page { command } => commands::page::execute(command, cli.db.as_ref(), cli.json),

        Commands::Move {
            marcher_id,
            page_id,
            x,
            y,
            notes,
        } => commands::hist::execute_move(
            *marcher_id,
            *page_id,
            *x,
            *y,
            notes.as_deref(),
            cli.db.as_ref(),
            cli.json,
        ),

        Commands::Undo => commands::hist::execute_undo(cli.db.as_ref(), cli.json),
        Commands::Redo => commands::hist::execute_redo(cli.db.as_ref(), cli.json),
        Commands::History { command } => {
            commands::hist::execute(command, cli.db.as_ref(), cli.json)
        }
        Commands::Appearance { command } => {
            commands::appearance::execute(command, cli.db.as_ref(), cli.json)
        }

        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
