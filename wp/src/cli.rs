//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Weekplan - terminal weekly planner
#[derive(Parser)]
#[command(
    name = "wp",
    about = "Terminal weekly planner with LLM-assisted auto-fill",
    version,
    after_help = "Logs are written to: ~/.local/share/weekplan/logs/weekplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive planner (default)
    Tui,

    /// Print a stored week
    Show {
        /// Any date in the week (defaults to today); resolved to its Monday
        #[arg(short, long)]
        week: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Generate a week plan from a goal without the TUI
    Generate {
        /// The goal to plan the week around
        goal: String,

        /// Any date in the target week (defaults to today)
        #[arg(short, long)]
        week: Option<String>,

        /// Persist the generated plan instead of printing it
        #[arg(short, long)]
        save: bool,
    },

    /// List stored weeks
    Weeks,
}

/// Output format for show
#[derive(Clone, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: '{}'. Supported: text, json", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["wp", "show", "--week", "2024-06-05", "--format", "json"]).unwrap();
        match cli.command {
            Some(Command::Show { week, format }) => {
                assert_eq!(week.as_deref(), Some("2024-06-05"));
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("Expected show subcommand"),
        }

        let cli = Cli::try_parse_from(["wp"]).unwrap();
        assert!(cli.command.is_none());
    }
}
