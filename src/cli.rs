//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolgun - trigger-driven prop runtime
#[derive(Parser, Debug)]
#[command(name = "toolgun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Warn when the control loop falls behind its refresh rate
    #[arg(long, global = true)]
    pub log_drop: bool,

    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the prop
    Run,

    /// Validate the configuration and content, then exit
    Check,

    /// Print the JSON Schema of a tool entry
    Schema,
}
