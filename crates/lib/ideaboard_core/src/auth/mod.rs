//! Authentication and authorization logic.
//!
//! Provides the session-token codec and engine, password hashing, and the
//! user-store queries shared by the API layer.

pub mod base64url;
pub mod password;
pub mod queries;
pub mod signature;
pub mod token;

use thiserror::Error;

pub use token::TokenError;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Carries every unmet strength rule so the caller can report them all
    /// in one response.
    #[error("Weak password: {}", .0.join(", "))]
    WeakPassword(Vec<String>),

    #[error("Email already registered")]
    DuplicateAccount,

    /// Wrong password and unknown email share one message so error text
    /// cannot be used to enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("GitHub error: {0}")]
    Github(String),
}
