//! CLI-specific error types
//!
//! All CLI errors are fatal for the process.

use std::fmt;
use std::io;

use crate::host::HostError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Request could not be parsed
    BadRequest,
    /// Data directory already set up
    AlreadySetUp,
    /// Data directory not set up
    NotSetUp,
    /// Host failed to open
    HostFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HEIRLOOM_CLI_CONFIG_ERROR",
            Self::IoError => "HEIRLOOM_CLI_IO_ERROR",
            Self::BadRequest => "HEIRLOOM_CLI_BAD_REQUEST",
            Self::AlreadySetUp => "HEIRLOOM_CLI_ALREADY_SET_UP",
            Self::NotSetUp => "HEIRLOOM_CLI_NOT_SET_UP",
            Self::HostFailed => "HEIRLOOM_CLI_HOST_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadRequest, msg)
    }

    pub fn already_set_up() -> Self {
        Self::new(CliErrorCode::AlreadySetUp, "Data directory already set up")
    }

    pub fn not_set_up() -> Self {
        Self::new(
            CliErrorCode::NotSetUp,
            "Data directory not set up. Run 'heirloom setup' first.",
        )
    }

    pub fn host_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::HostFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::bad_request(format!("JSON error: {}", e))
    }
}

impl From<HostError> for CliError {
    fn from(e: HostError) -> Self {
        Self::host_failed(format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
