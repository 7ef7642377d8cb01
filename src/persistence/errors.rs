//! # Persistence Errors

use std::io;

use thiserror::Error;

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failures reading or writing the durable record snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure, with the step that failed
    #[error("snapshot I/O failed while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Snapshot could not be encoded or decoded
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored checksum does not match the body
    #[error("snapshot checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// Snapshot written by an unknown format version
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u32),
}

impl PersistenceError {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { context, source }
    }

    /// Stable error code for logs and wire responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "HEIRLOOM_SNAPSHOT_IO",
            Self::Serialization(_) => "HEIRLOOM_SNAPSHOT_ENCODING",
            Self::ChecksumMismatch { .. } => "HEIRLOOM_SNAPSHOT_CORRUPTED",
            Self::UnsupportedVersion(_) => "HEIRLOOM_SNAPSHOT_VERSION",
        }
    }

    /// Whether the stored snapshot itself is unusable.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. } | Self::UnsupportedVersion(_) | Self::Serialization(_)
        )
    }
}
