//! Auth-related database queries.
//!
//! The auth core never issues SQL anywhere else; handlers and services go
//! through these functions.

use sqlx::PgPool;

use super::AuthError;
use crate::models::auth::User;

type UserRow = (String, Option<String>, String, Option<String>, Option<String>);

fn row_to_user(row: UserRow) -> User {
    let (id, email, name, github_id, password_hash) = row;
    User {
        id,
        email,
        name,
        github_id,
        password_hash,
    }
}

/// Fetch a user by email.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id::text, email, name, github_id, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_user))
}

/// Fetch a user by ID.
pub async fn find_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id::text, email, name, github_id, password_hash FROM users WHERE id = $1::uuid",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_user))
}

/// Fetch a user by GitHub account ID.
pub async fn find_user_by_github_id(
    pool: &PgPool,
    github_id: &str,
) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id::text, email, name, github_id, password_hash FROM users WHERE github_id = $1",
    )
    .bind(github_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(row_to_user))
}

/// Create a password-authenticated user, returning the user ID.
pub async fn create_password_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password_hash: &str,
) -> Result<String, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3) RETURNING id::text",
    )
    .bind(email)
    .bind(name)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(user_id)
}

/// Create a GitHub-authenticated user, returning the user ID.
pub async fn create_github_user(
    pool: &PgPool,
    email: Option<&str>,
    name: &str,
    github_id: &str,
) -> Result<String, AuthError> {
    let user_id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (email, name, github_id) VALUES ($1, $2, $3) RETURNING id::text",
    )
    .bind(email)
    .bind(name)
    .bind(github_id)
    .fetch_one(pool)
    .await?;
    Ok(user_id)
}

/// Set or replace a user's password digest.
pub async fn update_password(
    pool: &PgPool,
    user_id: &str,
    password_hash: &str,
) -> Result<(), AuthError> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2::uuid")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}
