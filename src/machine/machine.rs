//! Record Machine
//!
//! Owns the record state and dispatches calls against it. Every call is a
//! pure, total function of (state, caller, time, operation, args) producing
//! (decision, next state):
//!
//! 1. Resolve lifecycle: structural errors short-circuit before authorization
//! 2. Authorize via `AccessPolicy`
//! 3. Derive the `StateDelta` of an allowed call
//! 4. Apply the delta; a failed apply leaves state untouched

use crate::record::{DispatchResult, Identity, Record, RecordState};

use super::args::InitializeArgs;
use super::decision::Decision;
use super::delta::StateDelta;
use super::operation::Operation;
use super::policy::AccessPolicy;

/// One invocation of the record, as supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: Operation,
    pub args: Vec<Vec<u8>>,
    /// Already-authenticated caller
    pub caller: Identity,
    /// Wall-clock time supplied by the environment
    pub now: u64,
}

impl Call {
    /// Create a call without arguments.
    pub fn new(operation: Operation, caller: Identity, now: u64) -> Self {
        Self {
            operation,
            args: Vec::new(),
            caller,
            now,
        }
    }

    /// Create a call from a wire operation name.
    pub fn named(
        name: &str,
        args: Vec<Vec<u8>>,
        caller: Identity,
        now: u64,
    ) -> DispatchResult<Self> {
        Ok(Self {
            operation: Operation::from_name(name)?,
            args,
            caller,
            now,
        })
    }

    /// Attach arguments.
    pub fn with_args(mut self, args: Vec<Vec<u8>>) -> Self {
        self.args = args;
        self
    }
}

/// Result of a dispatched call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub operation: Operation,
    pub decision: Decision,
    /// Present only for allowed calls that change state
    pub delta: Option<StateDelta>,
}

impl DispatchOutcome {
    /// Check if the call was approved.
    pub fn is_allowed(&self) -> bool {
        self.decision.is_allowed()
    }

    /// Human-readable explanation of the decision.
    pub fn explain(&self) -> String {
        AccessPolicy::explain(self.operation, &self.decision)
    }
}

/// The access-control state machine for one record.
#[derive(Debug, Clone, Default)]
pub struct RecordMachine {
    state: RecordState,
}

impl RecordMachine {
    /// Create a machine with no record.
    pub fn new() -> Self {
        Self {
            state: RecordState::new(),
        }
    }

    /// Resume from a previously committed state.
    pub fn from_state(state: RecordState) -> Self {
        Self { state }
    }

    /// Get the current state.
    pub fn state(&self) -> &RecordState {
        &self.state
    }

    /// Get the current state name for observability.
    pub fn state_name(&self) -> &'static str {
        self.state.state_name()
    }

    /// Evaluate a call without mutating state.
    pub fn evaluate(&self, call: &Call) -> DispatchResult<DispatchOutcome> {
        let (decision, delta) = match call.operation {
            Operation::Initialize => {
                self.state.ensure_initializable()?;
                let args = InitializeArgs::decode(&call.args)?;
                let delta = StateDelta::Initialized {
                    creator: call.caller.clone(),
                    heir: args.heir,
                    unlock_time: args.unlock_time,
                };
                (Decision::Allowed, Some(delta))
            }
            operation => {
                let record = self.state.record()?;
                let decision = AccessPolicy::authorize(operation, record, &call.caller, call.now);
                let delta = Self::delta_for(operation, record, &decision);
                (decision, delta)
            }
        };

        Ok(DispatchOutcome {
            operation: call.operation,
            decision,
            delta,
        })
    }

    /// Commit a delta produced by [`RecordMachine::evaluate`].
    ///
    /// The machine keeps its current state if the delta does not apply.
    pub fn apply(&mut self, delta: &StateDelta) -> DispatchResult<()> {
        let next = delta.apply(self.state.clone())?;
        self.state = next;
        Ok(())
    }

    /// Evaluate and commit a call.
    pub fn dispatch(&mut self, call: &Call) -> DispatchResult<DispatchOutcome> {
        let outcome = self.evaluate(call)?;
        if let Some(delta) = &outcome.delta {
            self.apply(delta)?;
        }
        Ok(outcome)
    }

    fn delta_for(operation: Operation, record: &Record, decision: &Decision) -> Option<StateDelta> {
        if !decision.is_allowed() {
            return None;
        }
        match operation {
            Operation::TransferOwnership => Some(StateDelta::OwnerChanged {
                previous_owner: record.owner().clone(),
                new_owner: record.heir().clone(),
            }),
            Operation::Destroy => Some(StateDelta::Destroyed),
            Operation::Initialize
            | Operation::Read
            | Operation::MintMarker
            | Operation::UpdateLogic
            | Operation::FinalizeSession
            | Operation::Join => None,
        }
    }

    // =========================================================================
    // TYPED OPERATIONS
    // =========================================================================

    /// Create the record; the caller becomes creator and owner.
    pub fn initialize(
        &mut self,
        caller: &Identity,
        now: u64,
        unlock_time: u64,
        heir: Identity,
    ) -> DispatchResult<DispatchOutcome> {
        let args = InitializeArgs { unlock_time, heir }.encode();
        self.dispatch(&Call::new(Operation::Initialize, caller.clone(), now).with_args(args))
    }

    pub fn read(&mut self, caller: &Identity, now: u64) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::Read, caller.clone(), now))
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &Identity,
        now: u64,
    ) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::TransferOwnership, caller.clone(), now))
    }

    pub fn mint_marker(&mut self, caller: &Identity, now: u64) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::MintMarker, caller.clone(), now))
    }

    pub fn update_logic(&mut self, caller: &Identity, now: u64) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::UpdateLogic, caller.clone(), now))
    }

    pub fn destroy(&mut self, caller: &Identity, now: u64) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::Destroy, caller.clone(), now))
    }

    pub fn finalize_session(
        &mut self,
        caller: &Identity,
        now: u64,
    ) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::FinalizeSession, caller.clone(), now))
    }

    pub fn join(&mut self, caller: &Identity, now: u64) -> DispatchResult<DispatchOutcome> {
        self.dispatch(&Call::new(Operation::Join, caller.clone(), now))
    }
}
