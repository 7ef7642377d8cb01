//! Persistence
//!
//! Durable storage for the single record of a deployment. The state machine
//! defines only the logical layout; this module provides the reference
//! physical layout used by the host and CLI.

mod checksum;
mod errors;
mod snapshot;
mod store;

pub use checksum::{compute_checksum, verify_checksum};
pub use errors::{PersistenceError, PersistenceResult};
pub use snapshot::{SnapshotStore, SNAPSHOT_FORMAT_VERSION};
pub use store::{MemoryStateStore, StateStore};
