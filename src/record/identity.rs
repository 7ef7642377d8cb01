//! Caller identity
//!
//! An identity is an opaque, already-authenticated byte token. The hosting
//! environment verifies credentials before dispatch; the record only ever
//! compares identities for equality.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

use super::errors::{DispatchError, DispatchResult};

/// Opaque, comparable identity token.
///
/// Equality is evaluated in constant time with respect to the token contents.
///
/// Display is injective: printable UTF-8 renders as itself, anything else
/// (including text that itself starts with `b64:`) renders as `b64:<base64>`.
#[derive(Clone)]
pub struct Identity(Vec<u8>);

impl Identity {
    /// Create an identity from raw bytes.
    ///
    /// Empty tokens are rejected: an empty identity could never have been
    /// authenticated by the environment.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> DispatchResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DispatchError::InvalidArguments(
                "identity cannot be empty".to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Create an identity from a textual token (e.g. a ledger address).
    pub fn from_text(text: &str) -> DispatchResult<Self> {
        Self::from_bytes(text.as_bytes().to_vec())
    }

    /// Raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard base64 encoding of the token.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Decode an identity previously produced by [`Identity::to_base64`].
    pub fn from_base64(encoded: &str) -> DispatchResult<Self> {
        let bytes = STANDARD.decode(encoded).map_err(|e| {
            DispatchError::InvalidArguments(format!("identity is not valid base64: {}", e))
        })?;
        Self::from_bytes(bytes)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Identity {}

/// Prefix marking a base64-rendered identity.
const BASE64_DISPLAY_PREFIX: &str = "b64:";

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) if !s.starts_with(BASE64_DISPLAY_PREFIX) && !s.chars().any(char::is_control) => {
                write!(f, "{}", s)
            }
            _ => write!(f, "{}{}", BASE64_DISPLAY_PREFIX, self.to_base64()),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Identity::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}
