//! Integration tests — build the router and exercise the auth gate and the
//! no-database routes end to end with `tower::ServiceExt::oneshot`.
//!
//! The pool is created lazily and never connected: every request here is
//! either rejected by the gate or served from verified claims alone.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use ideaboard_api::{AppState, config::ApiConfig};
use ideaboard_core::auth::token;
use ideaboard_core::models::auth::TokenType;
use tower::ServiceExt;

const JWT_SECRET: &str = "integration-test-secret";

fn test_state() -> AppState {
    let pool = sqlx::PgPool::connect_lazy("postgres://localhost:5432/ideaboard_test")
        .expect("lazy pool");
    AppState {
        pool,
        config: ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "postgres://localhost:5432/ideaboard_test".into(),
            jwt_secret: JWT_SECRET.into(),
            github_client_id: "test-client-id".into(),
            github_client_secret: "test-client-secret".into(),
            public_base_url: "http://localhost:3100".into(),
        },
    }
}

fn get_me(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/me");
    if let Some(value) = cookie {
        builder = builder.header(header::COOKIE, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

#[tokio::test]
async fn protected_route_without_cookie_is_401() {
    let app = ideaboard_api::router(test_state());
    let resp = app.oneshot(get_me(None)).await.expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "unauthorized");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn protected_route_with_unrelated_cookie_is_401() {
    let app = ideaboard_api::router(test_state());
    let resp = app
        .oneshot(get_me(Some("other=value")))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_valid_token_echoes_claims() {
    let minted = token::issue_access_token(
        "user-42",
        "user@example.com",
        "Test User",
        JWT_SECRET.as_bytes(),
    );

    let app = ideaboard_api::router(test_state());
    let resp = app
        .oneshot(get_me(Some(&format!("token={minted}"))))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["id"], "user-42");
    assert_eq!(json["email"], "user@example.com");
    assert_eq!(json["name"], "Test User");
}

#[tokio::test]
async fn valid_token_survives_surrounding_cookies() {
    let minted = token::issue_access_token(
        "user-42",
        "user@example.com",
        "Test User",
        JWT_SECRET.as_bytes(),
    );

    let app = ideaboard_api::router(test_state());
    let cookie = format!("theme=dark; token={minted}; lang=en");
    let resp = app.oneshot(get_me(Some(&cookie))).await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_token_is_401() {
    let expired = token::issue_token(
        "user-42",
        "user@example.com",
        "Test User",
        TokenType::Access,
        None,
        JWT_SECRET.as_bytes(),
        -1,
    );

    let app = ideaboard_api::router(test_state());
    let resp = app
        .oneshot(get_me(Some(&format!("token={expired}"))))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_401() {
    let minted = token::issue_access_token(
        "user-42",
        "user@example.com",
        "Test User",
        JWT_SECRET.as_bytes(),
    );
    let mut parts: Vec<String> = minted.split('.').map(str::to_string).collect();
    let flipped = if parts[1].starts_with('e') { "f" } else { "e" };
    parts[1].replace_range(0..1, flipped);
    let tampered = parts.join(".");

    let app = ideaboard_api::router(test_state());
    let resp = app
        .oneshot(get_me(Some(&format!("token={tampered}"))))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() {
    let foreign = token::issue_access_token(
        "user-42",
        "user@example.com",
        "Test User",
        b"some-other-secret",
    );

    let app = ideaboard_api::router(test_state());
    let resp = app
        .oneshot(get_me(Some(&format!("token={foreign}"))))
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_does_not_reveal_which_check_failed() {
    let app = ideaboard_api::router(test_state());

    let no_cookie = app
        .clone()
        .oneshot(get_me(None))
        .await
        .expect("request");
    let garbage = app
        .oneshot(get_me(Some("token=not.a.token")))
        .await
        .expect("request");

    let a = body_json(no_cookie).await;
    let b = body_json(garbage).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = ideaboard_api::router(test_state());
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie header");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("Max-Age=0"));
    assert!(set_cookie.contains("HttpOnly"));

    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn github_login_redirects_to_authorize_url() {
    let app = ideaboard_api::router(test_state());
    let req = Request::builder()
        .uri("/api/auth/github")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::FOUND);

    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert!(location.starts_with("https://github.com/login/oauth/authorize"));
    assert!(location.contains("client_id=test-client-id"));
    assert!(location.contains("scope=user%3Aemail"));
}

#[tokio::test]
async fn github_login_without_configuration_is_500() {
    let mut state = test_state();
    state.config.github_client_id = String::new();

    let app = ideaboard_api::router(state);
    let req = Request::builder()
        .uri("/api/auth/github")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Internal detail stays out of the body.
    let json = body_json(resp).await;
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn github_callback_without_code_is_400() {
    let app = ideaboard_api::router(test_state());
    let req = Request::builder()
        .uri("/api/auth/github/callback")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "validation_error");
}
