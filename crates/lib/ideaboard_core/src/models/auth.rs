//! Authentication domain models.
//!
//! These are internal domain models, distinct from the request/response
//! types the API layer exposes.

use serde::{Deserialize, Serialize};

/// Domain user.
///
/// `email` is nullable: GitHub-originated accounts may expose no address.
/// `password_hash` is absent for accounts created via OAuth that never set
/// a password.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub name: String,
    pub github_id: Option<String>,
    pub password_hash: Option<String>,
}

/// Discriminates access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims carried by session tokens.
///
/// Fixed-shape on purpose: deserialization fails on a structurally
/// incomplete payload instead of admitting a partial claims map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID (standard JWT `sub` claim).
    pub sub: String,
    /// User email. Blank on refresh tokens.
    pub email: String,
    /// Display name. Blank on refresh tokens.
    pub name: String,
    /// Access or refresh.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Issued at (unix timestamp, seconds).
    pub iat: i64,
    /// Expiry (unix timestamp, seconds).
    pub exp: i64,
    /// Correlates a refresh token to a login session. Reserved; unused for
    /// revocation in this version.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
