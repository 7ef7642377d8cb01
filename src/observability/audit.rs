//! Decision Audit Log
//!
//! - Every dispatch attempt is recorded, whatever its outcome
//! - The log is append-only, one JSON record per line
//! - File writes are synced before `append` returns

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Audit record outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditOutcome {
    /// Call approved and committed.
    Allowed,

    /// Call denied by policy.
    Denied,

    /// Call rejected with a structural error.
    Rejected,

    /// Call could not be committed by the environment.
    Failed,
}

impl AuditOutcome {
    /// Returns the outcome string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOutcome::Allowed => "ALLOWED",
            AuditOutcome::Denied => "DENIED",
            AuditOutcome::Rejected => "REJECTED",
            AuditOutcome::Failed => "FAILED",
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single audit record.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// Unique record ID.
    pub id: Uuid,

    /// Wall-clock time the record was written.
    pub recorded_at: DateTime<Utc>,

    /// Operation name as received.
    pub operation: String,

    /// Caller identity, display form.
    pub caller: String,

    /// Logical time supplied to the state machine.
    pub call_time: u64,

    pub outcome: AuditOutcome,

    /// Denial reason or error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Lifecycle state after the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_after: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditRecord {
    /// Create a new audit record.
    pub fn new(
        operation: impl Into<String>,
        caller: impl Into<String>,
        call_time: u64,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            operation: operation.into(),
            caller: caller.into(),
            call_time,
            outcome,
            code: None,
            state_after: None,
            detail: None,
        }
    }

    /// Set the denial or error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the lifecycle state after the call.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state_after = Some(state.into());
        self
    }

    /// Set a free-form detail message.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Serialize to one JSON line.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"id":"{}","serialization_error":"{}"}}"#, self.id, e)
        })
    }
}

/// Audit log sink.
pub trait AuditLog: Send + Sync {
    /// Append a record. The record MUST be visible after this call returns.
    fn append(&self, record: &AuditRecord) -> io::Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> io::Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "audit log lock poisoned"))
}

/// Append-only file audit log; fsyncs after each record.
pub struct FileAuditLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAuditLog {
    /// Open or create an audit log file.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Get the audit log path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLog for FileAuditLog {
    fn append(&self, record: &AuditRecord) -> io::Result<()> {
        // Whole line in one unbuffered write.
        let mut line = record.to_json();
        line.push('\n');

        let mut file = lock(&self.file)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()
    }
}

/// In-memory audit log for testing and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAuditLog {
    /// Create a new in-memory audit log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded entries.
    pub fn records(&self) -> Vec<AuditRecord> {
        lock(&self.records).map(|r| r.clone()).unwrap_or_default()
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        lock(&self.records).map(|r| r.len()).unwrap_or(0)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLog for MemoryAuditLog {
    fn append(&self, record: &AuditRecord) -> io::Result<()> {
        lock(&self.records)?.push(record.clone());
        Ok(())
    }
}
