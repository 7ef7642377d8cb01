//! Argument codec
//!
//! Dispatch arguments are an ordered sequence of byte strings. Integers use
//! big-endian unsigned encoding of at most 8 bytes; identities are raw bytes.

use crate::record::{DispatchError, DispatchResult, Identity};

/// Maximum width of an encoded integer argument.
const MAX_UINT_WIDTH: usize = 8;

/// Canonical 8-byte big-endian encoding of an integer argument.
pub fn encode_uint(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Decode a big-endian unsigned integer of at most 8 bytes.
///
/// An empty byte string decodes to 0.
pub fn decode_uint(bytes: &[u8]) -> DispatchResult<u64> {
    if bytes.len() > MAX_UINT_WIDTH {
        return Err(DispatchError::InvalidArguments(format!(
            "integer argument is {} bytes, at most {} allowed",
            bytes.len(),
            MAX_UINT_WIDTH
        )));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

/// Decoded arguments of `initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeArgs {
    pub unlock_time: u64,
    pub heir: Identity,
}

impl InitializeArgs {
    /// Decode `[unlock_time, heir]`. Extra trailing arguments are ignored.
    pub fn decode(args: &[Vec<u8>]) -> DispatchResult<Self> {
        let (raw_time, raw_heir) = match args {
            [time, heir, ..] => (time, heir),
            _ => {
                return Err(DispatchError::InvalidArguments(format!(
                    "initialize expects [unlock_time, heir], got {} argument(s)",
                    args.len()
                )))
            }
        };

        Ok(Self {
            unlock_time: decode_uint(raw_time)?,
            heir: Identity::from_bytes(raw_heir.clone())?,
        })
    }

    /// Encode into dispatch arguments.
    pub fn encode(&self) -> Vec<Vec<u8>> {
        vec![encode_uint(self.unlock_time), self.heir.as_bytes().to_vec()]
    }
}
