//! Authorization decisions
//!
//! Every accepted call yields a decision. Denial is an expected outcome,
//! always paired with an explicit reason.

use serde::Serialize;

use crate::record::Identity;

/// Why an operation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Caller is neither owner nor heir and the time-lock has not expired.
    TimeLocked,

    /// Operation requires the current owner.
    NotOwner,

    /// Operation requires the creator.
    NotCreator,
}

impl DenialReason {
    /// Stable code for wire responses and audit records.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TimeLocked => "DENIED_TIME_LOCKED",
            Self::NotOwner => "DENIED_NOT_OWNER",
            Self::NotCreator => "DENIED_NOT_CREATOR",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TimeLocked => "caller is neither owner nor heir and the record is still time-locked",
            Self::NotOwner => "only the current owner may perform this operation",
            Self::NotCreator => "only the creator may perform this administrative operation",
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The operation is approved.
    Allowed,

    /// Ownership moved to the heir.
    OwnershipTransferred { new_owner: Identity },

    /// The operation is rejected.
    Denied(DenialReason),
}

impl Decision {
    /// Check if the decision approves the call.
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Denied(_))
    }

    /// Get denial reason if denied.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Self::Denied(reason) => Some(*reason),
            _ => None,
        }
    }

    /// New owner carried by a successful transfer.
    pub fn new_owner(&self) -> Option<&Identity> {
        match self {
            Self::OwnershipTransferred { new_owner } => Some(new_owner),
            _ => None,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::Denied(_) => "denied",
        }
    }
}
