//! Record Data Model
//!
//! - `Identity`: opaque, already-authenticated caller token
//! - `Record`: creator, owner, heir and unlock time of one digital memory
//! - `RecordState`: Uninitialized → Active → Destroyed lifecycle
//! - `DispatchError`: structural failures, kept apart from authorization

mod errors;
mod identity;
mod record;
mod state;

pub use errors::{DispatchError, DispatchResult};
pub use identity::Identity;
pub use record::Record;
pub use state::RecordState;
