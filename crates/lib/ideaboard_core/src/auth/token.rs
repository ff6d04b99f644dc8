//! Session token engine — mint and verify three-segment HS256 tokens.
//!
//! Wire format: `base64url(header).base64url(claims).base64url(signature)`
//! with the fixed header `{"alg":"HS256","typ":"JWT"}`. Tokens are value
//! objects: minted once, never mutated, only re-verified.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use super::{base64url, signature};
use crate::models::auth::{Claims, TokenType};

/// Access token lifetime: 1 hour.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Refresh token lifetime: 30 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 3600;

/// Token verification errors.
///
/// The API boundary collapses all of these into one unauthenticated
/// response; the distinction exists for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Invalid token format")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token issued in the future")]
    NotYetValid,
}

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// Mint a signed token with server-assigned timestamps.
///
/// Stamps `iat = now` and `exp = now + ttl_secs`. A non-positive TTL is
/// allowed here; verification rejects the result as expired.
pub fn issue_token(
    sub: &str,
    email: &str,
    name: &str,
    token_type: TokenType,
    session_id: Option<String>,
    secret: &[u8],
    ttl_secs: i64,
) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        token_type,
        iat: now,
        exp: now + ttl_secs,
        session_id,
    };
    // Claims and Header are plain string/integer structs; compact JSON
    // serialization cannot fail.
    let header_json = serde_json::to_string(&HEADER).expect("header serializes to JSON");
    let claims_json = serde_json::to_string(&claims).expect("claims serialize to JSON");

    let message = format!(
        "{}.{}",
        base64url::encode(header_json),
        base64url::encode(claims_json)
    );
    let sig = signature::sign(message.as_bytes(), secret);
    format!("{message}.{}", base64url::encode(sig))
}

/// Mint an access token (1 hour, carries email and display name).
pub fn issue_access_token(user_id: &str, email: &str, name: &str, secret: &[u8]) -> String {
    issue_token(
        user_id,
        email,
        name,
        TokenType::Access,
        None,
        secret,
        ACCESS_TOKEN_TTL_SECS,
    )
}

/// Generate a fresh session ID for a refresh token.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Mint a refresh token (30 days, carries a session ID).
///
/// Email and display name are blank; a refresh token carries only the
/// subject and its session ID.
pub fn issue_refresh_token(user_id: &str, session_id: &str, secret: &[u8]) -> String {
    issue_token(
        user_id,
        "",
        "",
        TokenType::Refresh,
        Some(session_id.to_string()),
        secret,
        REFRESH_TOKEN_TTL_SECS,
    )
}

/// Verify a token and return its claims.
///
/// Check order is an invariant: structure, then signature, then payload
/// parse, then the temporal claims. No payload field is trusted before the
/// signature over the raw `header.payload` text has been checked.
pub fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [header_b64, payload_b64, sig_b64] = parts.as_slice() else {
        return Err(TokenError::Malformed);
    };
    if header_b64.is_empty() || payload_b64.is_empty() || sig_b64.is_empty() {
        return Err(TokenError::Malformed);
    }

    let sig = base64url::decode(sig_b64).map_err(|_| TokenError::Malformed)?;
    let message_len = header_b64.len() + 1 + payload_b64.len();
    if !signature::verify(token[..message_len].as_bytes(), &sig, secret) {
        return Err(TokenError::BadSignature);
    }

    let payload = base64url::decode(payload_b64).map_err(|_| TokenError::Malformed)?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    let now = Utc::now().timestamp();
    if claims.exp < now {
        return Err(TokenError::Expired);
    }
    if claims.iat > now {
        return Err(TokenError::NotYetValid);
    }
    Ok(claims)
}
