//! Observable events
//!
//! Events are explicit and typed. Each maps to a stable log name.

use std::fmt;

/// Observable events in heirloom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Host lifecycle
    /// Host opened and state loaded
    HostOpened,
    /// Configuration loaded
    ConfigLoaded,
    /// Serving loop ready for requests
    Serving,
    /// Serving loop reached end of input
    ServingStopped,

    // Dispatch outcomes
    /// Record created
    RecordInitialized,
    /// Read access granted
    AccessGranted,
    /// Any operation denied by policy
    AccessDenied,
    /// Ownership passed to the heir
    OwnershipTransferred,
    /// Marker capability approved
    MarkerMinted,
    /// Creator approved a logic replacement
    LogicUpdateAuthorized,
    /// Record retired
    RecordDestroyed,
    /// Session bookkeeping approved
    SessionFinalized,
    /// Opt-in bookkeeping approved
    Joined,
    /// Call rejected with a structural error
    DispatchRejected,

    // Durability
    /// Snapshot committed
    SnapshotCommitted,
    /// Snapshot write failed; state not committed
    SnapshotFailed,
    /// Audit append failed
    AuditFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::HostOpened => "HOST_OPENED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "HEIRLOOM_SERVING",
            Event::ServingStopped => "HEIRLOOM_SERVING_STOPPED",

            Event::RecordInitialized => "RECORD_INITIALIZED",
            Event::AccessGranted => "ACCESS_GRANTED",
            Event::AccessDenied => "ACCESS_DENIED",
            Event::OwnershipTransferred => "OWNERSHIP_TRANSFERRED",
            Event::MarkerMinted => "MARKER_MINTED",
            Event::LogicUpdateAuthorized => "LOGIC_UPDATE_AUTHORIZED",
            Event::RecordDestroyed => "RECORD_DESTROYED",
            Event::SessionFinalized => "SESSION_FINALIZED",
            Event::Joined => "JOINED",
            Event::DispatchRejected => "DISPATCH_REJECTED",

            Event::SnapshotCommitted => "SNAPSHOT_COMMITTED",
            Event::SnapshotFailed => "SNAPSHOT_FAILED",
            Event::AuditFailed => "AUDIT_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_case() {
        let events = [
            Event::HostOpened,
            Event::ConfigLoaded,
            Event::Serving,
            Event::ServingStopped,
            Event::RecordInitialized,
            Event::AccessGranted,
            Event::AccessDenied,
            Event::OwnershipTransferred,
            Event::MarkerMinted,
            Event::LogicUpdateAuthorized,
            Event::RecordDestroyed,
            Event::SessionFinalized,
            Event::Joined,
            Event::DispatchRejected,
            Event::SnapshotCommitted,
            Event::SnapshotFailed,
            Event::AuditFailed,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }
}
