//! Authentication service — signup/login flows delegating to `ideaboard_core::auth`.

use sqlx::PgPool;
use tracing::info;

use ideaboard_core::auth::{AuthError, password, queries, token};
use ideaboard_core::github::GithubUser;

// Re-exported so the middleware and handlers verify through one path.
pub use ideaboard_core::auth::token::verify_token;

/// Register a new password-based account and mint a session token.
pub async fn signup(
    pool: &PgPool,
    email: &str,
    password_input: &str,
    name: &str,
    jwt_secret: &[u8],
) -> Result<String, AuthError> {
    let report = password::validate_strength(password_input);
    if !report.valid {
        return Err(AuthError::WeakPassword(report.errors));
    }

    if queries::email_exists(pool, email).await? {
        return Err(AuthError::DuplicateAccount);
    }

    let digest = password::hash_password(password_input);
    let user_id = queries::create_password_user(pool, email, name, &digest).await?;
    info!(user_id, "User registered");

    Ok(token::issue_access_token(&user_id, email, name, jwt_secret))
}

/// Authenticate with email + password and mint a session token.
///
/// Unknown email, password-less (GitHub-only) account, and wrong password
/// all produce the same `InvalidCredentials` so responses do not reveal
/// which accounts exist.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password_input: &str,
    jwt_secret: &[u8],
) -> Result<String, AuthError> {
    let user = queries::find_user_by_email(pool, email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let digest = user
        .password_hash
        .as_deref()
        .ok_or(AuthError::InvalidCredentials)?;

    if !password::verify_password(password_input, digest) {
        return Err(AuthError::InvalidCredentials);
    }

    info!(user_id = %user.id, "User logged in");
    Ok(token::issue_access_token(
        &user.id,
        user.email.as_deref().unwrap_or(""),
        &user.name,
        jwt_secret,
    ))
}

/// Complete a GitHub OAuth callback: find or create the account, then mint
/// a session token.
pub async fn github_login(
    pool: &PgPool,
    github_user: &GithubUser,
    jwt_secret: &[u8],
) -> Result<String, AuthError> {
    let github_id = github_user.id.to_string();

    let user = match queries::find_user_by_github_id(pool, &github_id).await? {
        Some(user) => user,
        None => {
            let user_id = queries::create_github_user(
                pool,
                github_user.email.as_deref(),
                github_user.display_name(),
                &github_id,
            )
            .await?;
            info!(user_id, github_id, "GitHub user registered");
            // Re-read so the token carries exactly what was stored.
            queries::find_user_by_id(pool, &user_id)
                .await?
                .ok_or(AuthError::InvalidCredentials)?
        }
    };

    info!(user_id = %user.id, "GitHub user logged in");
    Ok(token::issue_access_token(
        &user.id,
        user.email.as_deref().unwrap_or(""),
        &user.name,
        jwt_secret,
    ))
}

/// Set or replace the caller's password.
pub async fn set_password(
    pool: &PgPool,
    user_id: &str,
    password_input: &str,
) -> Result<(), AuthError> {
    let report = password::validate_strength(password_input);
    if !report.valid {
        return Err(AuthError::WeakPassword(report.errors));
    }

    let digest = password::hash_password(password_input);
    queries::update_password(pool, user_id, &digest).await?;
    info!(user_id, "Password updated");
    Ok(())
}
