use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use weekstore::WeekStore;
use weekstore::cli::{Cli, Command};
use weekstore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("weekstore starting");

    let store: WeekStore<serde_json::Value> = WeekStore::open(&config.store_path)?;

    match cli.command {
        Command::List => {
            let weeks = store.list_weeks()?;
            if weeks.is_empty() {
                println!("No weeks found");
            } else {
                for week in weeks {
                    println!("{}", week);
                }
            }
        }
        Command::Cat { week_id } => {
            let content = store.cat(&week_id)?;
            println!("{}", content);
        }
        Command::Delete { week_id } => {
            if store.delete(&week_id)? {
                println!("{} Deleted week: {}", "✓".green(), week_id.cyan());
            } else {
                println!("No record for week: {}", week_id);
            }
        }
        Command::Path => {
            println!("{}", store.path().display());
        }
    }

    Ok(())
}
