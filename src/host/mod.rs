//! Hosting Environment
//!
//! The state machine assumes an environment that authenticates callers,
//! supplies time, serializes calls and persists state. `RecordHost` is the
//! reference implementation of that contract.

mod clock;
mod errors;
mod host;
mod observer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{HostError, HostResult};
pub use host::RecordHost;
pub use observer::{event_for, severity_for};
