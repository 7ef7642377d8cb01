//! Access Control Tests
//!
//! End-to-end properties of the record state machine:
//! - owner always reads; owner and heir read before unlock; anyone after
//! - only the owner transfers, and only to the heir
//! - lifecycle errors are structural, never decisions

use heirloom::machine::{
    encode_uint, Call, Decision, DenialReason, Operation, RecordMachine, StateDelta,
};
use heirloom::record::{DispatchError, Identity, RecordState};

fn id(name: &str) -> Identity {
    Identity::from_text(name).unwrap()
}

fn active(unlock_time: u64) -> RecordMachine {
    let mut machine = RecordMachine::new();
    machine.initialize(&id("A"), 0, unlock_time, id("H")).unwrap();
    machine
}

// =============================================================================
// Read Access
// =============================================================================

/// The owner can read at any time.
#[test]
fn test_owner_always_reads() {
    let mut machine = active(1000);
    for now in [0, 999, 1000, 1001, u64::MAX] {
        assert!(machine.read(&id("A"), now).unwrap().is_allowed());
    }
}

/// Before unlock only the owner and heir can read.
#[test]
fn test_time_lock_before_unlock() {
    let mut machine = active(1000);
    assert!(machine.read(&id("H"), 10).unwrap().is_allowed());

    let outcome = machine.read(&id("C"), 10).unwrap();
    assert_eq!(outcome.decision, Decision::Denied(DenialReason::TimeLocked));
}

/// The unlock boundary is exclusive.
#[test]
fn test_unlock_boundary_is_strict() {
    let mut machine = active(1000);
    assert!(!machine.read(&id("C"), 1000).unwrap().is_allowed());
    assert!(machine.read(&id("C"), 1001).unwrap().is_allowed());
}

/// After unlock anyone can read.
#[test]
fn test_anyone_reads_after_unlock() {
    let mut machine = active(1000);
    for caller in ["A", "H", "C", "someone-else"] {
        assert!(machine.read(&id(caller), 5000).unwrap().is_allowed());
    }
}

// =============================================================================
// Ownership Transfer
// =============================================================================

/// The heir cannot promote itself.
#[test]
fn test_heir_cannot_self_promote() {
    let mut machine = active(1000);
    let outcome = machine.transfer_ownership(&id("H"), 5000).unwrap();

    assert_eq!(outcome.decision, Decision::Denied(DenialReason::NotOwner));
    assert!(outcome.delta.is_none());
    assert_eq!(machine.state().record().unwrap().owner(), &id("A"));
}

/// Once ownership moves, the former owner loses pre-unlock access.
#[test]
fn test_former_owner_loses_access() {
    let mut machine = active(1000);
    machine.transfer_ownership(&id("A"), 10).unwrap();

    let outcome = machine.read(&id("A"), 500).unwrap();
    assert_eq!(outcome.decision, Decision::Denied(DenialReason::TimeLocked));

    // Creator rights survive the transfer.
    assert!(machine.update_logic(&id("A"), 500).unwrap().is_allowed());
}

/// The heir field never rotates.
#[test]
fn test_transfer_keeps_heir_and_unlock_time() {
    let mut machine = active(1000);
    let outcome = machine.transfer_ownership(&id("A"), 0).unwrap();

    assert_eq!(
        outcome.delta,
        Some(StateDelta::OwnerChanged {
            previous_owner: id("A"),
            new_owner: id("H"),
        })
    );
    let record = machine.state().record().unwrap();
    assert_eq!(record.heir(), &id("H"));
    assert_eq!(record.unlock_time(), 1000);
    assert_eq!(record.creator(), &id("A"));
}

// =============================================================================
// Lifecycle
// =============================================================================

/// A second initialize fails and leaves the record untouched.
#[test]
fn test_second_initialize_rejected() {
    let mut machine = active(1000);
    let before = machine.state().clone();

    let err = machine.initialize(&id("C"), 0, 1, id("C")).unwrap_err();
    assert_eq!(err, DispatchError::AlreadyInitialized);
    assert_eq!(machine.state(), &before);
}

/// Every non-initialize operation needs a record.
#[test]
fn test_uninitialized_rejects_everything_but_initialize() {
    for op in Operation::ALL {
        if op == Operation::Initialize {
            continue;
        }
        let mut machine = RecordMachine::new();
        let err = machine.dispatch(&Call::new(op, id("A"), 0)).unwrap_err();
        assert_eq!(err, DispatchError::NotInitialized, "{}", op);
    }
}

/// Destroyed is terminal for every operation.
#[test]
fn test_destroyed_rejects_everything() {
    for op in Operation::ALL {
        let mut machine = active(1000);
        machine.destroy(&id("A"), 0).unwrap();

        let call = Call::new(op, id("A"), 0).with_args(vec![encode_uint(1), b"H".to_vec()]);
        let err = machine.dispatch(&call).unwrap_err();
        assert_eq!(err, DispatchError::AlreadyDestroyed, "{}", op);
        assert_eq!(machine.state(), &RecordState::Destroyed);
    }
}

/// Unknown names fail before any state is consulted.
#[test]
fn test_unknown_operation_in_any_state() {
    let err = Call::named("approve", vec![], id("A"), 0).unwrap_err();
    assert_eq!(err, DispatchError::UnknownOperation("approve".to_string()));
}

/// Malformed initialize arguments are structural errors.
#[test]
fn test_initialize_argument_errors() {
    let mut machine = RecordMachine::new();

    let missing = Call::new(Operation::Initialize, id("A"), 0).with_args(vec![encode_uint(1)]);
    assert!(matches!(
        machine.dispatch(&missing),
        Err(DispatchError::InvalidArguments(_))
    ));

    let oversized = Call::new(Operation::Initialize, id("A"), 0)
        .with_args(vec![vec![1; 9], b"H".to_vec()]);
    assert!(matches!(
        machine.dispatch(&oversized),
        Err(DispatchError::InvalidArguments(_))
    ));

    assert_eq!(machine.state(), &RecordState::Uninitialized);
}

// =============================================================================
// Scenario
// =============================================================================

/// Creator A, heir H, outsider C, unlock at 1000.
#[test]
fn test_inheritance_scenario() {
    let mut machine = RecordMachine::new();
    machine.initialize(&id("A"), 0, 1000, id("H")).unwrap();

    assert_eq!(
        machine.read(&id("C"), 500).unwrap().decision,
        Decision::Denied(DenialReason::TimeLocked)
    );
    assert!(machine.read(&id("C"), 1500).unwrap().is_allowed());

    assert_eq!(
        machine.transfer_ownership(&id("H"), 500).unwrap().decision,
        Decision::Denied(DenialReason::NotOwner)
    );

    let outcome = machine.transfer_ownership(&id("A"), 500).unwrap();
    assert_eq!(outcome.decision.new_owner(), Some(&id("H")));
    assert_eq!(machine.state().record().unwrap().owner(), &id("H"));

    assert_eq!(
        machine.read(&id("A"), 500).unwrap().decision,
        Decision::Denied(DenialReason::TimeLocked)
    );
}
