//! Cookie service — set/clear the httpOnly session cookie.
//!
//! One cookie carries the whole session: name `token`, value the signed
//! access token. Lifetime matches the token TTL so the browser and the
//! verifier expire together.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use ideaboard_core::auth::token::ACCESS_TOKEN_TTL_SECS;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "token";

/// Build the httpOnly session cookie.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::seconds(ACCESS_TOKEN_TTL_SECS))
        .build()
}

/// Build an expired session cookie to clear auth state.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}
