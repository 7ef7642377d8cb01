//! Closed operation set
//!
//! Operation names arrive as strings on the dispatch surface and are resolved
//! exactly once into this enum; everything downstream matches exhaustively.

use std::fmt;
use std::str::FromStr;

use crate::record::DispatchError;

/// Every operation the record understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create the record; caller becomes creator and owner.
    Initialize,
    /// Access check for the memory contents.
    Read,
    /// Owner hands ownership to the heir.
    TransferOwnership,
    /// Owner-only capability gate for attaching auxiliary artifacts.
    MintMarker,
    /// Creator-only approval to replace the record logic.
    UpdateLogic,
    /// Creator-only teardown.
    Destroy,
    /// End-of-interaction bookkeeping, always approved.
    FinalizeSession,
    /// Opt-in bookkeeping, always approved.
    Join,
}

impl Operation {
    /// All operations, in dispatch-table order.
    pub const ALL: [Operation; 8] = [
        Operation::Initialize,
        Operation::Read,
        Operation::TransferOwnership,
        Operation::MintMarker,
        Operation::UpdateLogic,
        Operation::Destroy,
        Operation::FinalizeSession,
        Operation::Join,
    ];

    /// Resolve a wire name.
    pub fn from_name(name: &str) -> Result<Self, DispatchError> {
        match name {
            "initialize" => Ok(Self::Initialize),
            "read" => Ok(Self::Read),
            "transfer_ownership" => Ok(Self::TransferOwnership),
            "mint_marker" => Ok(Self::MintMarker),
            "update_logic" => Ok(Self::UpdateLogic),
            "destroy" => Ok(Self::Destroy),
            "finalize_session" => Ok(Self::FinalizeSession),
            "join" => Ok(Self::Join),
            other => Err(DispatchError::UnknownOperation(other.to_string())),
        }
    }

    /// Wire name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Read => "read",
            Self::TransferOwnership => "transfer_ownership",
            Self::MintMarker => "mint_marker",
            Self::UpdateLogic => "update_logic",
            Self::Destroy => "destroy",
            Self::FinalizeSession => "finalize_session",
            Self::Join => "join",
        }
    }

    /// Control-plane operations gated on the creator rather than the owner.
    pub fn is_administrative(&self) -> bool {
        matches!(self, Self::UpdateLogic | Self::Destroy)
    }
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
