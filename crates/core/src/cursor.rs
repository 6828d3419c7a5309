//! Two-phase traversal cursor codec
//!
//! Group membership is read from two independently paginated sources: the
//! static-membership index scan and the smart-group search query. A cursor
//! pins the traversal position in exactly one of those phases, with a
//! self-describing tag so the phase is recoverable from the token alone.
//! The encoding is the serialized cursor as JSON, wrapped in unpadded
//! URL-safe base64 so tokens survive a URL query parameter unescaped.
//!
//! Callers must treat tokens as opaque; the wire shape may change between
//! versions.

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Resume position of a group-membership traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Cursor {
    /// Static phase: draining the membership index scan
    Static {
        /// Store-native scan continuation, `None` at the start of the scan
        #[serde(default, skip_serializing_if = "Option::is_none")]
        continuation: Option<String>,
    },
    /// Dynamic phase: draining the smart-group search results
    Dynamic {
        /// Next search offset
        offset: usize,
    },
}

impl Cursor {
    /// Canonical start of a traversal: static phase, beginning of the scan
    pub fn start() -> Self {
        Cursor::Static { continuation: None }
    }

    /// Encode this cursor into a printable, URL-safe token
    pub fn encode(&self) -> Result<String> {
        let payload = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(payload))
    }

    /// Decode a caller-supplied token
    ///
    /// An absent token is the canonical start state. Any token that is not
    /// valid base64-wrapped cursor JSON fails with `Error::InvalidCursor`,
    /// never a storage error.
    pub fn decode(token: Option<&str>) -> Result<Self> {
        let Some(token) = token else {
            return Ok(Cursor::start());
        };
        let payload = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| Error::InvalidCursor(token.to_string()))?;
        serde_json::from_slice(&payload).map_err(|_| Error::InvalidCursor(token.to_string()))
    }
}
