//! Terminal front end for mixlist.
//!
//! # Responsibility
//! - Map subcommands onto `App` use-cases (list screen and editor screen).
//! - Resolve configuration from the environment, then from flags.
//!
//! # Invariants
//! - Not-found and network failures are reported and exit 0.
//! - Store failures exit non-zero.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::output;
use cli::{Cli, Commands};
use log::warn;
use mixlist_core::{init_logging, App, AppConfig, RecordRef, WriteOutcome};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    cli.apply_overrides(&mut config);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Commands::Fields { kind } = cli.command {
        print!("{}", output::format_fields(kind));
        return Ok(());
    }

    let mut app = App::open(&config)
        .with_context(|| format!("failed to open store at {}", config.db_path.display()))?;
    execute(&mut app, cli.command)?;
    app.close().context("failed to close store")?;
    Ok(())
}

fn execute(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::List { json } => {
            let presenter = app.refresh()?;
            if json {
                println!("{}", serde_json::to_string_pretty(presenter.items())?);
            } else {
                println!("{}", output::format_list(&presenter.render_lines()).trim_end());
            }
        }
        Commands::Add { kind, fields } => {
            let mut session = app.begin_create(kind);
            report_ignored(&fields.apply(&mut session));
            let outcome = app.save(session)?;
            println!("{}", output::format_save(&outcome));
        }
        Commands::Edit { kind, id, fields } => {
            let (mut session, notice) = app.begin_edit(RecordRef { kind, id })?;
            if let Some(notice) = notice {
                eprintln!("{}", output::format_notice(&notice));
            }
            report_ignored(&fields.apply(&mut session));
            let outcome = app.save(session)?;
            println!("{}", output::format_save(&outcome));
        }
        Commands::Show { kind, id, json } => {
            let record = RecordRef { kind, id };
            match app.store().get_item(record)? {
                Some(item) if json => println!("{}", serde_json::to_string_pretty(&item)?),
                Some(item) => print!("{}", output::format_item(&item)),
                None => eprintln!("{}", output::not_found(record)),
            }
        }
        Commands::Delete { kind, id } => {
            let record = RecordRef { kind, id };
            match app.delete_record(record)? {
                WriteOutcome::Applied => println!("Deleted {} #{}", kind, id),
                WriteOutcome::NotFound => {
                    eprintln!("Nothing deleted: {}", output::not_found(record))
                }
            }
        }
        Commands::FetchQuote => match app.refresh_from_network() {
            Some(quote) => println!("Fetched quote #{}: {} ({})", quote.id, quote.text, quote.author),
            None => eprintln!("Could not fetch a quote; see the log for details"),
        },
        Commands::Clear => {
            app.clear_all()?;
            println!("Cleared all records");
        }
        Commands::Fields { kind } => print!("{}", output::format_fields(kind)),
    }
    Ok(())
}

fn report_ignored(flags: &[&str]) {
    for flag in flags {
        warn!("event=cli_args module=cli status=ignored flag={}", flag);
        eprintln!("warning: {flag} does not apply to this kind; ignored");
    }
}
