//! The access-control record
//!
//! One record exists per deployment. Its fields are never exposed mutably:
//! the only write paths are creation and the heir promotion performed by an
//! authorized ownership transfer.

use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// A time-locked, inheritable access-control record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    creator: Identity,
    owner: Identity,
    heir: Identity,
    unlock_time: u64,
}

impl Record {
    /// Create a record on behalf of the deploying identity.
    ///
    /// The creator is also the initial owner.
    pub(crate) fn create(creator: Identity, heir: Identity, unlock_time: u64) -> Self {
        Self {
            owner: creator.clone(),
            creator,
            heir,
            unlock_time,
        }
    }

    /// Copy the heir identity into the owner field.
    ///
    /// The heir field itself is left as-is, so repeating the promotion
    /// yields the same owner again.
    pub(crate) fn promote_heir(&self) -> Self {
        Self {
            owner: self.heir.clone(),
            ..self.clone()
        }
    }

    /// Identity that deployed the record.
    pub fn creator(&self) -> &Identity {
        &self.creator
    }

    /// Identity currently holding ownership.
    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    /// Identity designated to inherit ownership.
    pub fn heir(&self) -> &Identity {
        &self.heir
    }

    /// Timestamp after which anyone may read.
    pub fn unlock_time(&self) -> u64 {
        self.unlock_time
    }

    /// Whether the time-lock has expired at `now`.
    ///
    /// Strictly greater: at exactly `unlock_time` the record is still locked.
    pub fn is_unlocked_at(&self, now: u64) -> bool {
        now > self.unlock_time
    }

    pub fn is_owner(&self, caller: &Identity) -> bool {
        self.owner == *caller
    }

    pub fn is_heir(&self, caller: &Identity) -> bool {
        self.heir == *caller
    }

    pub fn is_creator(&self, caller: &Identity) -> bool {
        self.creator == *caller
    }
}
