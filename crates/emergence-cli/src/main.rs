//! Emergence risk calculator
//!
//! Computes linear vs. connected risk curves, compares pinned scenarios,
//! exports CSV and produces share links. Saved scenarios persist in a JSON
//! file under the data directory.

mod args;
mod config;
mod report;

use clap::Parser;
use emergence_model::CSV_FILE_NAME;
use emergence_scenarios::{JsonFileStore, ScenarioStore, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Cli, Command, SavedAction};
use crate::config::CliConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emergence=info,emergence_scenarios=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env();
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        store = %config.store_file.display(),
        "using saved-scenario store"
    );

    let store = JsonFileStore::new(&config.store_file);
    let mut session = match &cli.share {
        Some(query) => Session::from_share_query(store, query),
        None => Session::new(store),
    };
    let primary = cli.primary(session.primary());
    session.set_primary(primary);

    for arg in &cli.compare {
        if session.pin(arg.config, arg.name.as_deref()).is_none() {
            tracing::warn!("compare list is full, ignoring {}", arg.config);
        }
    }

    let command = cli.command.unwrap_or(Command::Summary { json: false });
    run(command, &mut session, &config)
}

fn run<S: ScenarioStore>(
    command: Command,
    session: &mut Session<S>,
    config: &CliConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Summary { json } => print_summary(session, json)?,
        Command::Table { every, json } => {
            let series = session.series();
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                let names: Vec<String> = session.compare().iter().map(|s| s.name.clone()).collect();
                print!("{}", report::table(&series, &names, every));
            }
        }
        Command::Export { out } => {
            let path = out.unwrap_or_else(|| CSV_FILE_NAME.into());
            let series = session.series();
            std::fs::write(&path, emergence_model::to_csv(&series))?;
            println!("Wrote {} rows to {}", series.len(), path.display());
        }
        Command::Share => println!("{}", config.share_link(&session.share_query())),
        Command::Saved { action } => run_saved(action, session, config)?,
    }
    Ok(())
}

fn run_saved<S: ScenarioStore>(
    action: SavedAction,
    session: &mut Session<S>,
    config: &CliConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SavedAction::List => print!("{}", report::saved_list(session.saved())),
        SavedAction::Save { name } => {
            let id = session.save_current(name.as_deref());
            println!("Saved {} as {}", session.primary(), id);
        }
        SavedAction::Delete { id } => {
            require_saved(session, &id)?;
            session.delete_saved(&id);
            println!("Deleted {id}");
        }
        SavedAction::Rename { id, name } => {
            require_saved(session, &id)?;
            session.rename_saved(&id, &name);
            println!("Renamed {id}");
        }
        SavedAction::Apply { id } => {
            require_saved(session, &id)?;
            session.apply(&id);
            print_summary(session, false)?;
        }
        SavedAction::Compare { id } => {
            require_saved(session, &id)?;
            if session.add_saved_to_compare(&id).is_none() {
                tracing::warn!("compare list is full, {id} was not added");
            }
            println!("{}", config.share_link(&session.share_query()));
        }
    }
    Ok(())
}

fn require_saved<S: ScenarioStore>(session: &Session<S>, id: &str) -> Result<(), String> {
    match session.saved().get(id) {
        Some(_) => Ok(()),
        None => Err(format!("no saved scenario with id {id:?}")),
    }
}

fn print_summary<S: ScenarioStore>(
    session: &Session<S>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = session.metrics();
    if json {
        let body = serde_json::json!({
            "configuration": session.primary(),
            "metrics": metrics,
            "compare": session.compare(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!(
            "{}",
            report::summary(session.primary(), &metrics, session.compare())
        );
    }
    Ok(())
}
