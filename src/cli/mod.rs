//! CLI module for heirloom
//!
//! Provides command-line interface for:
//! - setup: Create the data directory layout
//! - call: One-shot dispatch of a JSON request
//! - serve: Line-by-line dispatch loop
//! - inspect: Print the committed record state

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod request;

pub use args::{Cli, Command};
pub use commands::{call, inspect, run, run_command, serve, setup};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
pub use request::{outcome_to_json, state_to_json, WireRequest};
