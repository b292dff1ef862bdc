//! Weekplan - terminal weekly planner
//!
//! CLI entry point: launches the planner TUI or runs the headless
//! show/generate/weeks commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{info, warn};

use weekstore::{DebouncedSaver, WeekStore};

use weekplan::cli::{Cli, Command, OutputFormat};
use weekplan::config::Config;
use weekplan::domain::{WeeklyData, dates};
use weekplan::plan::{PlanError, PlanGenerator};
use weekplan::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weekplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, never stdout/stderr - the TUI owns the terminal
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("weekplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "Weekplan loaded config: provider={}, model={}, data_dir={}",
        config.llm.provider, config.llm.model, config.storage.data_dir
    );

    match cli.command {
        None | Some(Command::Tui) => cmd_tui(&config).await,
        Some(Command::Show { week, format }) => cmd_show(&config, week.as_deref(), format),
        Some(Command::Generate { goal, week, save }) => cmd_generate(&config, &goal, week.as_deref(), save).await,
        Some(Command::Weeks) => cmd_weeks(&config),
    }
}

/// Open the week store from config
fn open_store(config: &Config) -> Result<WeekStore<WeeklyData>> {
    WeekStore::open(&config.storage.data_dir).context("Failed to open week store")
}

/// Resolve an optional date argument to a week id (its Monday)
fn resolve_week(week: Option<&str>) -> Result<String> {
    match week {
        Some(raw) => {
            let date = dates::parse_iso(raw)?;
            Ok(dates::iso_date(dates::monday_of(date)))
        }
        None => Ok(dates::current_week_id()),
    }
}

/// Launch the planner TUI
async fn cmd_tui(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let saver = DebouncedSaver::new(store, Duration::from_millis(config.storage.debounce_ms));

    // A missing credential disables generation but not the planner
    let generator = match PlanGenerator::from_config(&config.llm) {
        Ok(generator) => Some(Arc::new(generator)),
        Err(PlanError::Configuration(msg)) => {
            warn!("Plan generation disabled: {}", msg);
            None
        }
        Err(e) => return Err(e).context("Failed to create plan generator"),
    };

    tui::run_planner(saver, generator).await
}

/// Print a stored week
fn cmd_show(config: &Config, week: Option<&str>, format: OutputFormat) -> Result<()> {
    let store = open_store(config)?;
    let week_id = resolve_week(week)?;

    let data = store
        .load(&week_id)?
        .unwrap_or_else(|| WeeklyData::empty(week_id.clone()));

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Text => {
            print_week(&data);
        }
    }

    Ok(())
}

/// Print a week as text
fn print_week(data: &WeeklyData) {
    println!("Week of {}", data.week_id.cyan().bold());
    println!();

    for (key, day) in data.days.iter() {
        println!("{}", key.label().yellow().bold());
        for task in &day.tasks {
            let mark = if task.done { "✓".green() } else { "·".dimmed() };
            println!("  {} {}", mark, task.text);
        }
        if !day.note.is_empty() {
            println!("  {} {}", "✎".dimmed(), day.note.dimmed());
        }
    }

    if !data.todo_list.is_empty() {
        println!();
        println!("{}", "To Do".yellow().bold());
        for task in &data.todo_list {
            let mark = if task.done { "✓".green() } else { "·".dimmed() };
            println!("  {} {}", mark, task.text);
        }
    }

    if !data.memo.is_empty() {
        println!();
        println!("{}", "Memo".yellow().bold());
        println!("  {}", data.memo);
    }
}

/// Generate a plan without the TUI
async fn cmd_generate(config: &Config, goal: &str, week: Option<&str>, save: bool) -> Result<()> {
    if goal.trim().is_empty() {
        return Err(eyre::eyre!("Goal must not be empty"));
    }

    let week_id = resolve_week(week)?;

    // Headless generation needs the credential up front
    let generator = PlanGenerator::from_config(&config.llm).context("Failed to create plan generator")?;

    println!("Generating plan for week {} ...", week_id.cyan());
    let plan = generator.generate(goal, &week_id).await?;

    let store = open_store(config)?;
    let mut data = store
        .load(&week_id)?
        .unwrap_or_else(|| WeeklyData::empty(week_id.clone()));
    data.apply_generated(plan);

    if save {
        store.save(&week_id, &data)?;
        println!("{} Saved plan for week {}", "✓".green(), week_id.cyan());
    } else {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Ok(())
}

/// List stored weeks
fn cmd_weeks(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let weeks = store.list_weeks()?;

    if weeks.is_empty() {
        println!("No weeks stored yet");
        return Ok(());
    }

    for week in weeks {
        println!("{}", week);
    }

    Ok(())
}
