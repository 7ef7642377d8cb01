//! Durable Record Snapshot
//!
//! The record state is persisted as a single JSON envelope:
//!
//! ```text
//! { "format_version": 1, "checksum": <crc32 of body>, "body": "<RecordState JSON>" }
//! ```
//!
//! Atomicity is achieved via:
//! 1. Write to temp file
//! 2. fsync temp file
//! 3. Rename temp to final (atomic on POSIX)
//! 4. fsync the parent directory
//!
//! A missing snapshot means no record has been created yet.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::RecordState;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{PersistenceError, PersistenceResult};

/// Current snapshot layout version.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Snapshot file name inside the state directory.
const SNAPSHOT_FILE_NAME: &str = "record.snapshot";

/// On-disk envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct SnapshotEnvelope {
    format_version: u32,
    checksum: u32,
    body: String,
}

/// Reads and writes the durable record state.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    snapshot_path: PathBuf,
    temp_path: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at `data_dir`.
    ///
    /// Files live under `<data_dir>/state/`.
    pub fn new(data_dir: &Path) -> Self {
        let state_dir = data_dir.join("state");
        Self {
            snapshot_path: state_dir.join(SNAPSHOT_FILE_NAME),
            temp_path: state_dir.join(format!("{}.tmp", SNAPSHOT_FILE_NAME)),
        }
    }

    /// Persist `state` atomically.
    ///
    /// After this returns, a reload observes exactly `state`.
    pub fn save(&self, state: &RecordState) -> PersistenceResult<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            fs::create_dir_all(parent)
                .map_err(PersistenceError::io("creating state directory"))?;
        }

        let body = serde_json::to_string(state)?;
        let envelope = SnapshotEnvelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            checksum: compute_checksum(body.as_bytes()),
            body,
        };
        let content = serde_json::to_vec_pretty(&envelope)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.temp_path)
            .map_err(PersistenceError::io("creating temp snapshot"))?;

        file.write_all(&content)
            .map_err(PersistenceError::io("writing temp snapshot"))?;
        file.sync_all()
            .map_err(PersistenceError::io("syncing temp snapshot"))?;

        fs::rename(&self.temp_path, &self.snapshot_path)
            .map_err(PersistenceError::io("committing snapshot"))?;

        // Make the rename itself durable
        if let Some(parent) = self.snapshot_path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }

    /// Load the committed state.
    ///
    /// Returns `RecordState::Uninitialized` when nothing has been saved.
    pub fn load(&self) -> PersistenceResult<RecordState> {
        if !self.snapshot_path.exists() {
            return Ok(RecordState::new());
        }

        let content = fs::read(&self.snapshot_path)
            .map_err(PersistenceError::io("reading snapshot"))?;
        let envelope: SnapshotEnvelope = serde_json::from_slice(&content)?;

        if envelope.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(envelope.format_version));
        }

        let body = envelope.body.as_bytes();
        if !verify_checksum(body, envelope.checksum) {
            return Err(PersistenceError::ChecksumMismatch {
                stored: envelope.checksum,
                computed: compute_checksum(body),
            });
        }

        Ok(serde_json::from_str(&envelope.body)?)
    }

    /// Check if a snapshot has been committed.
    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Get snapshot file path (for diagnostics).
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Identity;
    use tempfile::TempDir;

    fn active_state() -> RecordState {
        RecordState::new()
            .initialize(
                Identity::from_text("alice").unwrap(),
                Identity::from_bytes(vec![0x00, 0xfe]).unwrap(),
                1000,
            )
            .unwrap()
    }

    #[test]
    fn test_missing_snapshot_is_uninitialized() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());

        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), RecordState::Uninitialized);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());

        let state = active_state();
        store.save(&state).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());

        store.save(&active_state()).unwrap();
        store.save(&RecordState::Destroyed).unwrap();

        assert_eq!(store.load().unwrap(), RecordState::Destroyed);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.save(&active_state()).unwrap();

        let temp = tmp.path().join("state").join("record.snapshot.tmp");
        assert!(!temp.exists());
    }

    #[test]
    fn test_tampered_body_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.save(&active_state()).unwrap();

        let content = fs::read_to_string(store.snapshot_path()).unwrap();
        let tampered = content.replace("1000", "1001");
        fs::write(store.snapshot_path(), tampered).unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, PersistenceError::ChecksumMismatch { .. }));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_unknown_version_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.save(&RecordState::Destroyed).unwrap();

        let mut envelope: serde_json::Value =
            serde_json::from_slice(&fs::read(store.snapshot_path()).unwrap()).unwrap();
        envelope["format_version"] = serde_json::json!(9);
        fs::write(store.snapshot_path(), envelope.to_string()).unwrap();

        let err = store.load().unwrap_err();
        assert_eq!(err.code(), "HEIRLOOM_SNAPSHOT_VERSION");
    }

    #[test]
    fn test_repeated_loads_identical() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.save(&active_state()).unwrap();

        assert_eq!(store.load().unwrap(), store.load().unwrap());
    }
}
