//! # Host Errors

use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::record::DispatchError;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Failures surfaced by the hosting environment.
#[derive(Debug, Error)]
pub enum HostError {
    /// The state machine rejected the call structurally
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The next state could not be made durable; nothing was committed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A previous holder of the record lock panicked
    #[error("record lock poisoned")]
    LockPoisoned,
}

impl HostError {
    /// Stable error code for logs and wire responses.
    pub fn code(&self) -> &'static str {
        match self {
            HostError::Dispatch(e) => e.code(),
            HostError::Persistence(e) => e.code(),
            HostError::LockPoisoned => "HEIRLOOM_LOCK_POISONED",
        }
    }
}
