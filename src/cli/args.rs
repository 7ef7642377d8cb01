//! CLI argument definitions using clap
//!
//! Commands:
//! - heirloom setup --config <path>
//! - heirloom call --config <path> [--now <ts>]
//! - heirloom serve --config <path> [--now <ts>]
//! - heirloom inspect --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// heirloom - a time-locked, inheritable access-control record
#[derive(Parser, Debug)]
#[command(name = "heirloom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory layout
    Setup {
        /// Path to configuration file
        #[arg(long, default_value = "./heirloom.json")]
        config: PathBuf,
    },

    /// Dispatch a single JSON request read from stdin
    Call {
        /// Path to configuration file
        #[arg(long, default_value = "./heirloom.json")]
        config: PathBuf,

        /// Pin the current time (seconds since epoch) instead of the system clock
        #[arg(long)]
        now: Option<u64>,
    },

    /// Dispatch JSON requests line by line until end of input
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./heirloom.json")]
        config: PathBuf,

        /// Pin the current time (seconds since epoch) instead of the system clock
        #[arg(long)]
        now: Option<u64>,
    },

    /// Print the committed record state
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./heirloom.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
