//! Store-native scan continuation tokens
//!
//! A continuation is the last key a scan yielded, base64-wrapped so callers
//! see an opaque token. The scan resumes strictly after that key, which
//! makes resumption deterministic for an unchanged key set: no duplicates,
//! no gaps. Tokens that do not decode are rejected with
//! `Error::InvalidContinuation`; there is no server-side record of issued
//! tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rolodex_core::{Error, Result};

/// Encode the last yielded key as an opaque resume token
pub(crate) fn encode(last_key: &str) -> String {
    URL_SAFE_NO_PAD.encode(last_key)
}

/// Decode a resume token back into the key to scan strictly after
pub(crate) fn decode(token: &str) -> Result<String> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| Error::InvalidContinuation(token.to_string()))?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidContinuation(token.to_string()))
}
