//! Structural dispatch errors
//!
//! These describe calls that are not valid against the record's lifecycle or
//! wire contract. Authorization failures are NOT errors: a denied call is an
//! expected business outcome and is reported as `Decision::Denied`.

use thiserror::Error;

/// Result type for record operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Structural errors raised before any authorization is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Any operation other than `initialize` before the record exists
    #[error("record has not been initialized")]
    NotInitialized,

    /// `initialize` called on a record that already exists
    #[error("record is already initialized")]
    AlreadyInitialized,

    /// Any operation after the record was destroyed
    #[error("record has been destroyed")]
    AlreadyDestroyed,

    /// Operation name outside the closed operation set
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation arguments could not be decoded
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

impl DispatchError {
    /// Stable error code for wire responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::NotInitialized => "HEIRLOOM_NOT_INITIALIZED",
            DispatchError::AlreadyInitialized => "HEIRLOOM_ALREADY_INITIALIZED",
            DispatchError::AlreadyDestroyed => "HEIRLOOM_ALREADY_DESTROYED",
            DispatchError::UnknownOperation(_) => "HEIRLOOM_UNKNOWN_OPERATION",
            DispatchError::InvalidArguments(_) => "HEIRLOOM_INVALID_ARGUMENTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DispatchError::NotInitialized.code(), "HEIRLOOM_NOT_INITIALIZED");
        assert_eq!(
            DispatchError::UnknownOperation("x".into()).code(),
            "HEIRLOOM_UNKNOWN_OPERATION"
        );
    }

    #[test]
    fn test_unknown_operation_message_names_operation() {
        let err = DispatchError::UnknownOperation("approve".into());
        assert!(err.to_string().contains("approve"));
    }
}
