//! Base64URL codec for token segments.
//!
//! Padding-free URL-safe alphabet, the variant JWT segments use.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encode bytes as padding-free Base64URL.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decode a padding-free Base64URL string.
///
/// Fails on non-alphabet characters or impossible lengths; callers treat
/// the error as an authentication failure.
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}
