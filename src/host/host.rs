//! Record Host
//!
//! Reference environment around the state machine:
//! - Serializes all calls against the record behind a single lock
//! - Supplies wall-clock time from a `Clock`
//! - Makes the next state durable BEFORE committing it in memory
//! - Reports every call through logs and the audit log
//!
//! If persisting fails, the call fails and the in-memory state is unchanged.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::machine::{Call, DispatchOutcome, RecordMachine};
use crate::observability::{AuditLog, AuditOutcome, AuditRecord, Event, Logger};
use crate::persistence::{SnapshotStore, StateStore};
use crate::record::{DispatchError, Identity, RecordState};

use super::clock::Clock;
use super::errors::{HostError, HostResult};
use super::observer;

/// Serialized, durable dispatcher for one record.
pub struct RecordHost {
    machine: Mutex<RecordMachine>,
    store: Box<dyn StateStore>,
    clock: Box<dyn Clock>,
    audit: Option<Box<dyn AuditLog>>,
    log_decisions: bool,
}

impl RecordHost {
    /// Open a host over `store`, resuming its committed state.
    pub fn new(store: Box<dyn StateStore>, clock: Box<dyn Clock>) -> HostResult<Self> {
        let state = store.load()?;
        let state_name = state.state_name();
        Logger::info(Event::HostOpened.as_str(), &[("state", state_name)]);

        Ok(Self {
            machine: Mutex::new(RecordMachine::from_state(state)),
            store,
            clock,
            audit: None,
            log_decisions: true,
        })
    }

    /// Open a host backed by the snapshot under `data_dir`.
    pub fn open(data_dir: &Path, clock: Box<dyn Clock>) -> HostResult<Self> {
        Self::new(Box::new(SnapshotStore::new(data_dir)), clock)
    }

    /// Attach an audit log.
    pub fn with_audit(mut self, audit: Box<dyn AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Enable or disable per-decision log lines.
    pub fn with_decision_logging(mut self, enabled: bool) -> Self {
        self.log_decisions = enabled;
        self
    }

    /// Current time according to the host clock.
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Snapshot of the committed state.
    pub fn state(&self) -> HostResult<RecordState> {
        Ok(self.lock()?.state().clone())
    }

    /// Dispatch by wire name at the host clock's current time.
    pub fn dispatch_named(
        &self,
        operation_name: &str,
        args: Vec<Vec<u8>>,
        caller: Identity,
    ) -> HostResult<DispatchOutcome> {
        let now = self.clock.now();
        self.dispatch_named_at(operation_name, args, caller, now)
    }

    /// Dispatch by wire name at an explicit time.
    pub fn dispatch_named_at(
        &self,
        operation_name: &str,
        args: Vec<Vec<u8>>,
        caller: Identity,
        now: u64,
    ) -> HostResult<DispatchOutcome> {
        match Call::named(operation_name, args, caller.clone(), now) {
            Ok(call) => self.dispatch(&call),
            Err(err) => {
                self.report_rejection(operation_name, &caller, now, &err, None);
                Err(err.into())
            }
        }
    }

    /// Dispatch a resolved call.
    pub fn dispatch(&self, call: &Call) -> HostResult<DispatchOutcome> {
        let mut machine = self.lock()?;

        let outcome = match machine.evaluate(call) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.report_rejection(
                    call.operation.name(),
                    &call.caller,
                    call.now,
                    &err,
                    Some(machine.state_name()),
                );
                return Err(err.into());
            }
        };

        if let Some(delta) = &outcome.delta {
            let next = delta.apply(machine.state().clone())?;

            if let Err(err) = self.store.save(&next) {
                let message = err.to_string();
                Logger::error(
                    Event::SnapshotFailed.as_str(),
                    &[
                        ("error", message.as_str()),
                        ("operation", call.operation.name()),
                    ],
                );
                self.append_audit(
                    AuditRecord::new(
                        call.operation.name(),
                        call.caller.to_string(),
                        call.now,
                        AuditOutcome::Failed,
                    )
                    .with_code(err.code())
                    .with_state(machine.state_name())
                    .with_detail(message),
                );
                return Err(err.into());
            }

            Logger::trace(
                Event::SnapshotCommitted.as_str(),
                &[("delta", delta.kind()), ("state", next.state_name())],
            );
            *machine = RecordMachine::from_state(next);
        }

        let state_name = machine.state_name();
        if self.log_decisions {
            observer::log_outcome(call, &outcome, state_name);
        }
        self.append_audit(observer::audit_outcome(call, &outcome, state_name));

        Ok(outcome)
    }

    fn lock(&self) -> HostResult<MutexGuard<'_, RecordMachine>> {
        self.machine.lock().map_err(|_| HostError::LockPoisoned)
    }

    fn report_rejection(
        &self,
        operation_name: &str,
        caller: &Identity,
        now: u64,
        err: &DispatchError,
        state_name: Option<&str>,
    ) {
        let caller = caller.to_string();
        let message = err.to_string();
        if self.log_decisions {
            Logger::warn(
                Event::DispatchRejected.as_str(),
                &[
                    ("caller", caller.as_str()),
                    ("code", err.code()),
                    ("error", message.as_str()),
                    ("operation", operation_name),
                ],
            );
        }

        let mut record = AuditRecord::new(operation_name, caller, now, AuditOutcome::Rejected)
            .with_code(err.code())
            .with_detail(message);
        if let Some(state) = state_name {
            record = record.with_state(state);
        }
        self.append_audit(record);
    }

    fn append_audit(&self, record: AuditRecord) {
        let Some(audit) = &self.audit else {
            return;
        };
        if let Err(err) = audit.append(&record) {
            let message = err.to_string();
            Logger::error(
                Event::AuditFailed.as_str(),
                &[("error", message.as_str()), ("operation", record.operation.as_str())],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::clock::FixedClock;
    use crate::machine::{encode_uint, Decision, DenialReason};
    use crate::observability::MemoryAuditLog;
    use crate::persistence::{MemoryStateStore, PersistenceError, PersistenceResult};

    fn id(s: &str) -> Identity {
        Identity::from_text(s).unwrap()
    }

    fn init_args(unlock_time: u64, heir: &str) -> Vec<Vec<u8>> {
        vec![encode_uint(unlock_time), heir.as_bytes().to_vec()]
    }

    struct FailingStore;

    impl StateStore for FailingStore {
        fn load(&self) -> PersistenceResult<RecordState> {
            Ok(RecordState::new())
        }

        fn save(&self, _state: &RecordState) -> PersistenceResult<()> {
            Err(PersistenceError::Io {
                context: "writing temp snapshot",
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            })
        }
    }

    fn host_with_clock(now: u64) -> RecordHost {
        RecordHost::new(Box::new(MemoryStateStore::new()), Box::new(FixedClock::new(now)))
            .unwrap()
            .with_decision_logging(false)
    }

    #[test]
    fn test_dispatch_uses_host_clock() {
        let host = host_with_clock(1500);
        host.dispatch_named("initialize", init_args(1000, "H"), id("A"))
            .unwrap();

        let outcome = host.dispatch_named("read", vec![], id("C")).unwrap();
        assert!(outcome.is_allowed());
    }

    #[test]
    fn test_unknown_operation_rejected_and_audited() {
        let audit = MemoryAuditLog::new();
        let host = host_with_clock(0).with_audit(Box::new(audit.clone()));

        let err = host.dispatch_named("mint_nft", vec![], id("A")).unwrap_err();
        assert_eq!(err.code(), "HEIRLOOM_UNKNOWN_OPERATION");

        let records = audit.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, "mint_nft");
        assert_eq!(records[0].outcome, AuditOutcome::Rejected);
    }

    #[test]
    fn test_failed_persist_leaves_state_untouched() {
        let audit = MemoryAuditLog::new();
        let host = RecordHost::new(Box::new(FailingStore), Box::new(FixedClock::new(0)))
            .unwrap()
            .with_decision_logging(false)
            .with_audit(Box::new(audit.clone()));

        let err = host
            .dispatch_named("initialize", init_args(10, "H"), id("A"))
            .unwrap_err();
        assert!(matches!(err, HostError::Persistence(_)));
        assert_eq!(host.state().unwrap(), RecordState::Uninitialized);
        assert_eq!(audit.records()[0].outcome, AuditOutcome::Failed);
    }

    #[test]
    fn test_denied_calls_skip_persistence() {
        let store = MemoryStateStore::new();
        let host = RecordHost::new(Box::new(store.clone()), Box::new(FixedClock::new(0)))
            .unwrap()
            .with_decision_logging(false);

        host.dispatch_named("initialize", init_args(10, "H"), id("A"))
            .unwrap();
        let outcome = host
            .dispatch_named("transfer_ownership", vec![], id("H"))
            .unwrap();

        assert_eq!(outcome.decision, Decision::Denied(DenialReason::NotOwner));
        let persisted = store.load().unwrap();
        assert_eq!(persisted.record().unwrap().owner(), &id("A"));
    }

    #[test]
    fn test_committed_state_reaches_store() {
        let store = MemoryStateStore::new();
        let host = RecordHost::new(Box::new(store.clone()), Box::new(FixedClock::new(0)))
            .unwrap()
            .with_decision_logging(false);

        host.dispatch_named("initialize", init_args(10, "H"), id("A"))
            .unwrap();
        host.dispatch_named("transfer_ownership", vec![], id("A"))
            .unwrap();

        assert_eq!(store.load().unwrap(), host.state().unwrap());
    }

    #[test]
    fn test_audit_one_record_per_call() {
        let audit = MemoryAuditLog::new();
        let host = host_with_clock(0).with_audit(Box::new(audit.clone()));

        host.dispatch_named("read", vec![], id("A")).unwrap_err();
        host.dispatch_named("initialize", init_args(10, "H"), id("A"))
            .unwrap();
        host.dispatch_named("read", vec![], id("C")).unwrap();

        let outcomes: Vec<_> = audit.records().iter().map(|r| r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![AuditOutcome::Rejected, AuditOutcome::Allowed, AuditOutcome::Denied]
        );
    }
}
