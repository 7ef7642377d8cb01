//! CLI command implementations
//!
//! Commands are thin clients over `RecordHost`. Structural dispatch errors
//! are reported as error responses; only configuration and I/O failures
//! abort the process.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::host::{Clock, FixedClock, HostError, RecordHost, SystemClock};
use crate::observability::{Event, FileAuditLog, Logger};
use crate::persistence::SnapshotStore;
use crate::record::RecordState;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_requests, write_error, write_response};
use super::request::{outcome_to_json, state_to_json, WireRequest};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command.
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Setup { config } => setup(&config),
        Command::Call { config, now } => call(&config, now),
        Command::Serve { config, now } => serve(&config, now),
        Command::Inspect { config } => inspect(&config),
    }
}

/// Create `<data_dir>/state` and `<data_dir>/audit`.
pub fn setup(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if is_set_up(&config) {
        return Err(CliError::already_set_up());
    }

    let audit_dir = config.data_path().join("audit");
    for dir in [config.state_dir(), audit_dir] {
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::config_error(format!("Failed to create directory {:?}: {}", dir, e))
        })?;
    }

    write_response(
        &mut io::stdout().lock(),
        json!({"set_up": true, "data_dir": config.data_dir}),
    )
}

/// Dispatch one request from stdin.
pub fn call(config_path: &Path, now: Option<u64>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let host = open_host(&config, now)?;

    let request = read_request()?;
    respond(&host, request, &mut io::stdout().lock())
}

/// Dispatch requests from stdin until end of input.
pub fn serve(config_path: &Path, now: Option<u64>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let host = open_host(&config, now)?;

    Logger::info(Event::Serving.as_str(), &[("data_dir", config.data_dir.as_str())]);
    serve_lines(&host, io::stdin().lock(), &mut io::stdout().lock())?;
    Logger::info(Event::ServingStopped.as_str(), &[]);
    Ok(())
}

/// Print the committed record state.
///
/// Reads the snapshot only; no host is opened and nothing is audited.
pub fn inspect(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let state = load_state(&config)?;

    write_response(&mut io::stdout().lock(), state_to_json(&state))
}

/// One response per request line; malformed lines get an error response.
fn serve_lines<R: BufRead, W: Write>(host: &RecordHost, input: R, out: &mut W) -> CliResult<()> {
    for line in read_requests(input) {
        match line? {
            Ok(request) => respond(host, request, out)?,
            Err(e) => write_error(out, e.code_str(), e.message())?,
        }
    }
    Ok(())
}

/// Dispatch one request. The request's `now` wins over the host clock.
fn respond<W: Write>(host: &RecordHost, request: Value, out: &mut W) -> CliResult<()> {
    let request = match WireRequest::from_value(request) {
        Ok(request) => request,
        Err(e) => return write_error(out, e.code_str(), e.message()),
    };
    let (caller, args) = match request.caller().and_then(|c| Ok((c, request.encoded_args()?))) {
        Ok(parts) => parts,
        Err(e) => return write_error(out, e.code_str(), e.message()),
    };

    let now = request.now.unwrap_or_else(|| host.now());
    match host.dispatch_named_at(&request.op, args, caller, now) {
        Ok(outcome) => write_response(out, outcome_to_json(&outcome, &host.state()?)),
        Err(HostError::Dispatch(e)) => write_error(out, e.code(), &e.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Host over the configured data directory. `--now` pins the clock.
fn open_host(config: &Config, now: Option<u64>) -> CliResult<RecordHost> {
    if !is_set_up(config) {
        return Err(CliError::not_set_up());
    }
    Logger::trace(Event::ConfigLoaded.as_str(), &[("data_dir", config.data_dir.as_str())]);

    let clock: Box<dyn Clock> = match now {
        Some(now) => Box::new(FixedClock::new(now)),
        None => Box::new(SystemClock),
    };

    let mut host =
        RecordHost::open(config.data_path(), clock)?.with_decision_logging(config.log_decisions);

    if config.audit_enabled {
        let audit = FileAuditLog::open(config.audit_log_path()).map_err(|e| {
            CliError::io_error(format!("Failed to open audit log: {}", e))
        })?;
        host = host.with_audit(Box::new(audit));
    }

    Ok(host)
}

fn load_state(config: &Config) -> CliResult<RecordState> {
    if !is_set_up(config) {
        return Err(CliError::not_set_up());
    }
    let state = SnapshotStore::new(config.data_path())
        .load()
        .map_err(HostError::from)?;
    Ok(state)
}

fn is_set_up(config: &Config) -> bool {
    config.state_dir().is_dir()
}
