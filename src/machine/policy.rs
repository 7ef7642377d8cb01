//! Access Policy
//!
//! Evaluates whether a caller may perform an operation on a live record.
//! Each operation has exactly one authorization predicate:
//!
//! - read: owner OR heir OR time-lock expired
//! - transfer_ownership, mint_marker: owner
//! - update_logic, destroy: creator
//! - finalize_session, join: unconditional
//!
//! Policy logic is deterministic, side-effect free and explainable.

use crate::record::{Identity, Record};

use super::decision::{Decision, DenialReason};
use super::operation::Operation;

/// Authorization predicates over a live record.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `caller` may perform `operation` at `now`.
    ///
    /// `initialize` is not gated by the policy: it is only reachable while no
    /// record exists, so this returns `Allowed` for it.
    pub fn authorize(
        operation: Operation,
        record: &Record,
        caller: &Identity,
        now: u64,
    ) -> Decision {
        match operation {
            Operation::Read => Self::read(record, caller, now),
            Operation::TransferOwnership => Self::transfer(record, caller),
            Operation::MintMarker => Self::owner_only(record, caller),
            Operation::UpdateLogic | Operation::Destroy => Self::creator_only(record, caller),
            Operation::Initialize | Operation::FinalizeSession | Operation::Join => {
                Decision::Allowed
            }
        }
    }

    /// Ownership and inheritance always grant read access; the time-lock is
    /// the fallback that eventually opens the record to anyone.
    pub fn read(record: &Record, caller: &Identity, now: u64) -> Decision {
        if record.is_owner(caller) || record.is_heir(caller) || record.is_unlocked_at(now) {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::TimeLocked)
        }
    }

    /// Only the current owner may hand ownership to the heir. The time-lock
    /// plays no part here.
    pub fn transfer(record: &Record, caller: &Identity) -> Decision {
        if record.is_owner(caller) {
            Decision::OwnershipTransferred {
                new_owner: record.heir().clone(),
            }
        } else {
            Decision::Denied(DenialReason::NotOwner)
        }
    }

    pub fn owner_only(record: &Record, caller: &Identity) -> Decision {
        if record.is_owner(caller) {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::NotOwner)
        }
    }

    /// Control-plane authority stays with the creator regardless of who
    /// currently owns the record.
    pub fn creator_only(record: &Record, caller: &Identity) -> Decision {
        if record.is_creator(caller) {
            Decision::Allowed
        } else {
            Decision::Denied(DenialReason::NotCreator)
        }
    }

    /// Generate an explanation for a decision.
    pub fn explain(operation: Operation, decision: &Decision) -> String {
        match decision {
            Decision::Allowed => format!("{} allowed", operation),
            Decision::OwnershipTransferred { new_owner } => {
                format!("{} allowed: ownership passed to {}", operation, new_owner)
            }
            Decision::Denied(reason) => format!(
                "{} denied: {} ({})",
                operation,
                reason.description(),
                reason.code()
            ),
        }
    }
}
