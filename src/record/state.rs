//! Record Lifecycle State Machine
//!
//! - `Uninitialized` is the only initial state
//! - `Active` holds the one record of the deployment
//! - `Destroyed` is terminal
//!
//! Transitions consume the current state and either return the next state
//! or a structural error. A failed transition never yields a partially
//! updated state.

use serde::{Deserialize, Serialize};

use super::errors::{DispatchError, DispatchResult};
use super::identity::Identity;
use super::record::Record;

/// Lifecycle of the single record of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "lifecycle", rename_all = "snake_case")]
pub enum RecordState {
    /// No record exists yet; only `initialize` is accepted.
    Uninitialized,

    /// The record exists and serves operations.
    Active {
        /// The live record
        record: Record,
    },

    /// The creator retired the record. Terminal.
    Destroyed,
}

impl Default for RecordState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordState {
    /// Create a state machine in `Uninitialized`.
    pub fn new() -> Self {
        Self::Uninitialized
    }

    /// Get the state name for observability.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Active { .. } => "Active",
            Self::Destroyed => "Destroyed",
        }
    }

    /// Whether a live record exists.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Whether the terminal state has been reached.
    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed)
    }

    /// Borrow the live record, or fail with the lifecycle error that applies.
    pub fn record(&self) -> DispatchResult<&Record> {
        match self {
            Self::Uninitialized => Err(DispatchError::NotInitialized),
            Self::Active { record } => Ok(record),
            Self::Destroyed => Err(DispatchError::AlreadyDestroyed),
        }
    }

    /// Fail unless `initialize` is acceptable in the current state.
    pub fn ensure_initializable(&self) -> DispatchResult<()> {
        match self {
            Self::Uninitialized => Ok(()),
            Self::Active { .. } => Err(DispatchError::AlreadyInitialized),
            Self::Destroyed => Err(DispatchError::AlreadyDestroyed),
        }
    }

    // =========================================================================
    // ALLOWED TRANSITIONS
    // =========================================================================

    /// Uninitialized → Active
    ///
    /// The caller becomes both creator and owner.
    pub fn initialize(
        self,
        creator: Identity,
        heir: Identity,
        unlock_time: u64,
    ) -> DispatchResult<Self> {
        self.ensure_initializable()?;
        Ok(Self::Active {
            record: Record::create(creator, heir, unlock_time),
        })
    }

    /// Active → Active, with ownership moved to the heir.
    pub fn promote_heir(self) -> DispatchResult<Self> {
        let record = self.record()?.promote_heir();
        Ok(Self::Active { record })
    }

    /// Active → Destroyed
    pub fn destroy(self) -> DispatchResult<Self> {
        self.record()?;
        Ok(Self::Destroyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identity {
        Identity::from_text(s).unwrap()
    }

    fn active() -> RecordState {
        RecordState::new()
            .initialize(id("alice"), id("bob"), 1000)
            .unwrap()
    }

    #[test]
    fn test_default_is_uninitialized() {
        let state = RecordState::default();
        assert_eq!(state.state_name(), "Uninitialized");
        assert_eq!(state.record().unwrap_err(), DispatchError::NotInitialized);
    }

    #[test]
    fn test_uninitialized_to_active() {
        let state = active();
        assert!(state.is_active());

        let record = state.record().unwrap();
        assert_eq!(record.owner(), &id("alice"));
        assert_eq!(record.creator(), &id("alice"));
        assert_eq!(record.heir(), &id("bob"));
    }

    #[test]
    fn test_forbidden_initialize_twice() {
        let result = active().initialize(id("mallory"), id("eve"), 5);
        assert_eq!(result.unwrap_err(), DispatchError::AlreadyInitialized);
    }

    #[test]
    fn test_forbidden_initialize_after_destroy() {
        let state = active().destroy().unwrap();
        let result = state.initialize(id("alice"), id("bob"), 1);
        assert_eq!(result.unwrap_err(), DispatchError::AlreadyDestroyed);
    }

    #[test]
    fn test_promote_heir() {
        let state = active().promote_heir().unwrap();
        assert_eq!(state.record().unwrap().owner(), &id("bob"));
    }

    #[test]
    fn test_forbidden_promote_uninitialized() {
        let result = RecordState::new().promote_heir();
        assert_eq!(result.unwrap_err(), DispatchError::NotInitialized);
    }

    #[test]
    fn test_active_to_destroyed_is_terminal() {
        let state = active().destroy().unwrap();
        assert!(state.is_destroyed());
        assert_eq!(state.clone().destroy().unwrap_err(), DispatchError::AlreadyDestroyed);
        assert_eq!(state.promote_heir().unwrap_err(), DispatchError::AlreadyDestroyed);
    }

    #[test]
    fn test_forbidden_destroy_uninitialized() {
        let result = RecordState::new().destroy();
        assert_eq!(result.unwrap_err(), DispatchError::NotInitialized);
    }

    #[test]
    fn test_state_serialization_tagged() {
        let json = serde_json::to_value(RecordState::Destroyed).unwrap();
        assert_eq!(json["lifecycle"], "destroyed");

        let json = serde_json::to_value(active()).unwrap();
        assert_eq!(json["lifecycle"], "active");
        assert_eq!(json["record"]["unlock_time"], 1000);
    }
}
