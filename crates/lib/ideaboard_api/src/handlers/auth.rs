//! Authentication request handlers.

use axum::{Extension, Json};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header::LOCATION};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use ideaboard_core::github;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::services::{auth, cookies};

/// Where the browser lands after a successful login.
const POST_LOGIN_REDIRECT: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SessionResponse {
    fn to_dashboard() -> Self {
        Self {
            success: true,
            redirect: POST_LOGIN_REDIRECT.to_string(),
        }
    }
}

/// Browser-style 302 redirect.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// `POST /api/auth/signup` — create a password-based account.
pub async fn signup_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let token = auth::signup(
        &state.pool,
        &body.email,
        &body.password,
        &body.name,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok((
        jar.add(cookies::session_cookie(&token)),
        Json(SessionResponse::to_dashboard()),
    ))
}

/// `POST /api/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let token = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    Ok((
        jar.add(cookies::session_cookie(&token)),
        Json(SessionResponse::to_dashboard()),
    ))
}

/// `POST /api/auth/logout` — clear the session cookie.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    (
        jar.add(cookies::clear_session_cookie()),
        Json(SuccessResponse { success: true }),
    )
}

/// `GET /api/auth/github` — redirect the browser to GitHub's authorize page.
pub async fn github_handler(State(state): State<AppState>) -> AppResult<Response> {
    if state.config.github_client_id.is_empty() {
        return Err(AppError::Internal("GitHub OAuth is not configured".into()));
    }
    let url = github::authorize_url(
        &state.config.github_client_id,
        &state.config.github_callback_url(),
    );
    Ok(found(&url))
}

/// `GET /api/auth/github/callback` — complete the OAuth flow and open a
/// session.
pub async fn github_callback_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> AppResult<(CookieJar, Response)> {
    let code = params
        .code
        .ok_or_else(|| AppError::Validation("Missing code parameter".into()))?;

    let access_token = github::exchange_code(
        &state.config.github_client_id,
        &state.config.github_client_secret,
        &code,
    )
    .await?;
    let github_user = github::fetch_user(&access_token).await?;

    let token = auth::github_login(
        &state.pool,
        &github_user,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;

    Ok((
        jar.add(cookies::session_cookie(&token)),
        found(POST_LOGIN_REDIRECT),
    ))
}

/// `POST /api/auth/set-password` — set or replace the caller's password.
/// Requires an authenticated session.
pub async fn set_password_handler(
    State(state): State<AppState>,
    Extension(SessionUser(claims)): Extension<SessionUser>,
    Json(body): Json<SetPasswordRequest>,
) -> AppResult<Json<SuccessResponse>> {
    auth::set_password(&state.pool, &claims.sub, &body.password).await?;
    Ok(Json(SuccessResponse { success: true }))
}
