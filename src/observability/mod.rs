//! Observability subsystem for heirloom
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and decision events
//! - Append-only decision audit log
//!
//! Observability describes what happened; it never decides what happens.
//! Failures here are reported but never change a dispatch outcome.

mod audit;
mod events;
mod logger;

pub use audit::{AuditLog, AuditOutcome, AuditRecord, FileAuditLog, MemoryAuditLog};
pub use events::Event;
pub use logger::{Logger, Severity};
