//! CLI argument parsing for weekstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ws")]
#[command(author, version, about = "Inspect per-week planner records", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all stored weeks
    List,

    /// Display a week's raw record
    Cat {
        /// Week id (ISO date of the week's Monday)
        #[arg(required = true)]
        week_id: String,
    },

    /// Delete a week's record
    Delete {
        /// Week id to delete
        #[arg(required = true)]
        week_id: String,
    },

    /// Print the store directory path
    Path,
}
