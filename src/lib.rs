//! heirloom - a time-locked, inheritable access-control record
//!
//! One record per deployment: a creator, an owner, a designated heir and an
//! unlock time after which the record is publicly readable.
//!
//! - `record`, `machine`: the pure state machine (no I/O)
//! - `persistence`, `host`: durable, serialized hosting of one record
//! - `observability`: structured logs and the decision audit log
//! - `cli`: JSON over stdin/stdout

pub mod cli;
pub mod host;
pub mod machine;
pub mod observability;
pub mod persistence;
pub mod record;
