//! State store seam
//!
//! The host persists through this trait so the physical layout can be
//! swapped: `SnapshotStore` on disk, `MemoryStateStore` for embedding and
//! tests.

use std::sync::{Arc, Mutex};

use crate::record::RecordState;

use super::errors::{PersistenceError, PersistenceResult};
use super::snapshot::SnapshotStore;

/// Durable home of the record state.
pub trait StateStore: Send + Sync {
    /// Load the committed state; `Uninitialized` if none.
    fn load(&self) -> PersistenceResult<RecordState>;

    /// Commit `state`. After success, `load` returns exactly `state`.
    fn save(&self, state: &RecordState) -> PersistenceResult<()>;
}

impl StateStore for SnapshotStore {
    fn load(&self) -> PersistenceResult<RecordState> {
        SnapshotStore::load(self)
    }

    fn save(&self, state: &RecordState) -> PersistenceResult<()> {
        SnapshotStore::save(self, state)
    }
}

/// Volatile store; clones share the same slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    state: Arc<Mutex<RecordState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> PersistenceResult<RecordState> {
        self.state
            .lock()
            .map(|s| s.clone())
            .map_err(|_| poisoned())
    }

    fn save(&self, state: &RecordState) -> PersistenceResult<()> {
        let mut slot = self.state.lock().map_err(|_| poisoned())?;
        *slot = state.clone();
        Ok(())
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Io {
        context: "locking memory store",
        source: std::io::Error::new(std::io::ErrorKind::Other, "lock poisoned"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip_shared() {
        let store = MemoryStateStore::new();
        let handle = store.clone();

        assert_eq!(store.load().unwrap(), RecordState::Uninitialized);
        store.save(&RecordState::Destroyed).unwrap();
        assert_eq!(handle.load().unwrap(), RecordState::Destroyed);
    }
}
