//! Auth gate middleware — session cookie extraction and token verification.
//!
//! Every rejection is the same 401. Which check failed (no cookie, no
//! `token` entry, bad signature, expired) is visible in logs only.

use std::collections::HashMap;

use axum::http::header::COOKIE;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::AppState;
use crate::error::AppError;
use crate::services::auth::verify_token;
use crate::services::cookies::SESSION_COOKIE;

/// Key used to store verified `Claims` in request extensions.
#[derive(Debug, Clone)]
pub struct SessionUser(pub ideaboard_core::models::auth::Claims);

fn unauthorized() -> AppError {
    AppError::Unauthorized("Authentication required".into())
}

/// Axum middleware: reads the session cookie, verifies the token, and
/// injects `SessionUser` into request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(unauthorized)?;

    let cookies = parse_cookies(header);
    let token = cookies.get(SESSION_COOKIE).ok_or_else(unauthorized)?;

    let claims = verify_token(token, state.config.jwt_secret.as_bytes()).map_err(|e| {
        debug!(error = %e, "Session token rejected");
        unauthorized()
    })?;

    request.extensions_mut().insert(SessionUser(claims));

    Ok(next.run(request).await)
}

/// Parse a `Cookie` header into name/value pairs.
///
/// Splits on `;`, then each entry on the FIRST `=` so values containing
/// `=` (like the token's base64url segments) survive intact. Entries
/// without `=` or with an empty name are skipped.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
    header
        .split(';')
        .filter_map(|entry| {
            let (name, value) = entry.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_cookie() {
        let cookies = parse_cookies("token=abc123");
        assert_eq!(cookies.get("token").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn parses_multiple_cookies_with_whitespace() {
        let cookies = parse_cookies("a=1; token=xyz;  b=2 ");
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
        assert_eq!(cookies.get("token").map(String::as_str), Some("xyz"));
        assert_eq!(cookies.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn splits_on_the_first_equals_only() {
        let cookies = parse_cookies("token=eyJh.eyJz=dWI=");
        assert_eq!(
            cookies.get("token").map(String::as_str),
            Some("eyJh.eyJz=dWI=")
        );
    }

    #[test]
    fn skips_entries_without_equals() {
        let cookies = parse_cookies("garbage; token=ok");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("token").map(String::as_str), Some("ok"));
    }

    #[test]
    fn skips_entries_with_empty_name() {
        let cookies = parse_cookies("=orphan; token=ok");
        assert_eq!(cookies.len(), 1);
        assert!(cookies.contains_key("token"));
    }

    #[test]
    fn keeps_empty_values() {
        let cookies = parse_cookies("token=");
        assert_eq!(cookies.get("token").map(String::as_str), Some(""));
    }

    #[test]
    fn empty_header_yields_no_cookies() {
        assert!(parse_cookies("").is_empty());
        assert!(parse_cookies(";;;").is_empty());
    }
}
