//! Wire requests and responses
//!
//! Request: `{"op": "initialize", "caller": "alice", "args": [1000, "bob"], "now": 1500}`
//!
//! - `caller` is a string or `{"b64": "..."}`
//! - numbers encode as 8-byte big-endian integers
//! - strings encode as UTF-8 bytes
//! - `{"b64": "..."}` passes raw bytes
//! - `now` is optional and overrides the host clock

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::machine::{encode_uint, DispatchOutcome};
use crate::record::{Identity, RecordState};

use super::errors::{CliError, CliResult};

/// A parsed CLI request.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRequest {
    pub op: String,
    pub caller: Value,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub now: Option<u64>,
}

impl WireRequest {
    /// Parse a request from a JSON value.
    pub fn from_value(value: Value) -> CliResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Caller identity, in the same string or `{"b64"}` forms as arguments.
    pub fn caller(&self) -> CliResult<Identity> {
        if self.caller.is_number() {
            return Err(CliError::bad_request(
                "caller must be a string or {\"b64\": \"...\"}",
            ));
        }
        let bytes = encode_arg(&self.caller)?;
        Identity::from_bytes(bytes).map_err(|e| CliError::bad_request(e.to_string()))
    }

    /// Arguments as dispatch byte strings.
    pub fn encoded_args(&self) -> CliResult<Vec<Vec<u8>>> {
        self.args.iter().map(encode_arg).collect()
    }
}

fn encode_arg(value: &Value) -> CliResult<Vec<u8>> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(encode_uint)
            .ok_or_else(|| CliError::bad_request(format!("integer argument out of range: {}", n))),
        Value::String(s) => Ok(s.as_bytes().to_vec()),
        Value::Object(map) => match map.get("b64") {
            Some(Value::String(encoded)) => STANDARD
                .decode(encoded)
                .map_err(|e| CliError::bad_request(format!("invalid base64 argument: {}", e))),
            _ => Err(CliError::bad_request("object arguments must be {\"b64\": \"...\"}")),
        },
        other => Err(CliError::bad_request(format!("unsupported argument: {}", other))),
    }
}

/// Response payload for a dispatched call.
pub fn outcome_to_json(outcome: &DispatchOutcome, state: &RecordState) -> Value {
    let mut data = json!({
        "operation": outcome.operation.name(),
        "decision": outcome.decision.label(),
        "allowed": outcome.is_allowed(),
        "explanation": outcome.explain(),
        "state": state.state_name(),
    });

    if let Some(reason) = outcome.decision.denial_reason() {
        data["reason"] = json!(reason.code());
    }
    if let Some(owner) = outcome.decision.new_owner() {
        data["new_owner"] = json!(owner.to_string());
    }
    if let Some(delta) = &outcome.delta {
        data["delta"] = serde_json::to_value(delta).unwrap_or(Value::Null);
    }
    data
}

/// Response payload describing the committed state.
pub fn state_to_json(state: &RecordState) -> Value {
    match state.record() {
        Ok(record) => json!({
            "state": state.state_name(),
            "creator": record.creator().to_string(),
            "owner": record.owner().to_string(),
            "heir": record.heir().to_string(),
            "unlock_time": record.unlock_time(),
        }),
        Err(_) => json!({ "state": state.state_name() }),
    }
}
