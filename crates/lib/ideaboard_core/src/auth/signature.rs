//! HMAC-SHA256 message signing and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a message with HMAC-SHA256.
pub fn sign(message: &[u8], secret: &[u8]) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Verify a signature against a message.
///
/// `Mac::verify_slice` compares the full MAC length in constant time.
pub fn verify(message: &[u8], signature: &[u8], secret: &[u8]) -> bool {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(message);
    mac.verify_slice(signature).is_ok()
}
