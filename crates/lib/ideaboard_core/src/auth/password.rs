//! Password hashing and strength validation.
//!
//! Hashing is a single unsalted SHA-256 pass rendered as lowercase hex.
//! That is deliberately preserved legacy behavior: without a salt or an
//! iteration count it is weak against offline brute force compared to a
//! dedicated password KDF.

use sha2::{Digest, Sha256};

/// Minimum password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Result of a strength check. `valid` iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Hash a password: SHA-256 over the UTF-8 bytes, lowercase hex.
///
/// Deterministic; the same input always yields the same digest.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a password against a stored digest.
pub fn verify_password(password: &str, digest_hex: &str) -> bool {
    hash_password(password) == digest_hex
}

/// Check password strength, accumulating every violated rule so the caller
/// can report all of them in one response.
pub fn validate_strength(password: &str) -> StrengthReport {
    let mut errors = Vec::new();

    if password.len() < MIN_PASSWORD_LEN {
        errors.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain a digit".to_string());
    }

    StrengthReport {
        valid: errors.is_empty(),
        errors,
    }
}
