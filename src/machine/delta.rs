//! State deltas
//!
//! A delta is the full description of what an allowed call changes. Deltas
//! are produced by evaluation and applied separately, so the environment can
//! make the next state durable before committing it.

use serde::Serialize;

use crate::record::{DispatchResult, Identity, RecordState};

/// A state change produced by an allowed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateDelta {
    /// The record was created.
    Initialized {
        creator: Identity,
        heir: Identity,
        unlock_time: u64,
    },

    /// Ownership moved to the heir.
    OwnerChanged {
        previous_owner: Identity,
        new_owner: Identity,
    },

    /// The record was retired.
    Destroyed,
}

impl StateDelta {
    /// Apply the delta, yielding the next state.
    pub fn apply(&self, state: RecordState) -> DispatchResult<RecordState> {
        match self {
            Self::Initialized {
                creator,
                heir,
                unlock_time,
            } => state.initialize(creator.clone(), heir.clone(), *unlock_time),
            Self::OwnerChanged { .. } => state.promote_heir(),
            Self::Destroyed => state.destroy(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialized { .. } => "initialized",
            Self::OwnerChanged { .. } => "owner_changed",
            Self::Destroyed => "destroyed",
        }
    }
}
