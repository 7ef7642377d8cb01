//! Decision reporting
//!
//! Maps dispatch results to events, log lines and audit records. Reporting
//! never feeds back into the decision.

use crate::machine::{Call, Decision, DispatchOutcome, Operation};
use crate::observability::{AuditOutcome, AuditRecord, Event, Logger, Severity};

/// Event describing an accepted call.
pub fn event_for(outcome: &DispatchOutcome) -> Event {
    if let Decision::Denied(_) = outcome.decision {
        return Event::AccessDenied;
    }
    match outcome.operation {
        Operation::Initialize => Event::RecordInitialized,
        Operation::Read => Event::AccessGranted,
        Operation::TransferOwnership => Event::OwnershipTransferred,
        Operation::MintMarker => Event::MarkerMinted,
        Operation::UpdateLogic => Event::LogicUpdateAuthorized,
        Operation::Destroy => Event::RecordDestroyed,
        Operation::FinalizeSession => Event::SessionFinalized,
        Operation::Join => Event::Joined,
    }
}

/// Severity for an accepted call.
pub fn severity_for(outcome: &DispatchOutcome) -> Severity {
    match outcome.decision {
        Decision::Denied(_) => Severity::Warn,
        _ if outcome.operation.is_administrative() => Severity::Info,
        _ if outcome.delta.is_some() => Severity::Info,
        _ => Severity::Trace,
    }
}

/// Log an accepted call.
pub fn log_outcome(call: &Call, outcome: &DispatchOutcome, state_name: &str) {
    let caller = call.caller.to_string();
    let now = call.now.to_string();
    let explanation = outcome.explain();
    Logger::log(
        severity_for(outcome),
        event_for(outcome).as_str(),
        &[
            ("caller", caller.as_str()),
            ("explanation", explanation.as_str()),
            ("now", now.as_str()),
            ("operation", outcome.operation.name()),
            ("state", state_name),
        ],
    );
}

/// Audit record for an accepted call.
pub fn audit_outcome(call: &Call, outcome: &DispatchOutcome, state_name: &str) -> AuditRecord {
    let record = AuditRecord::new(
        outcome.operation.name(),
        call.caller.to_string(),
        call.now,
        if outcome.is_allowed() {
            AuditOutcome::Allowed
        } else {
            AuditOutcome::Denied
        },
    )
    .with_state(state_name);

    match outcome.decision.denial_reason() {
        Some(reason) => record.with_code(reason.code()),
        None => record,
    }
}
