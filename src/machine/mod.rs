//! Access-Control Record State Machine
//!
//! Receives an already-authenticated caller and an operation, consults the
//! record state, and returns an allow/deny decision plus an optional state
//! delta.
//!
//! - Operations form a closed set, matched exhaustively
//! - Structural errors (`DispatchError`) are separate from authorization
//!   outcomes (`Decision::Denied`)
//! - Time only ever gates `read`
//! - No I/O, no blocking, no background work
//!
//! The hosting environment is responsible for serializing calls against one
//! record and for supplying caller identity and wall-clock time.

mod args;
mod decision;
mod delta;
mod machine;
mod operation;
mod policy;

pub use args::{decode_uint, encode_uint, InitializeArgs};
pub use decision::{Decision, DenialReason};
pub use delta::StateDelta;
pub use machine::{Call, DispatchOutcome, RecordMachine};
pub use operation::Operation;
pub use policy::AccessPolicy;
