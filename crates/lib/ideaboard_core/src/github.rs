//! GitHub OAuth client.
//!
//! Covers the three calls the login flow needs: building the authorize
//! redirect, exchanging the callback code for an access token, and fetching
//! the authenticated user's profile (with a fallback lookup for accounts
//! that keep their email private).

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::auth::AuthError;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";
const EMAILS_URL: &str = "https://api.github.com/user/emails";

/// GitHub requires a User-Agent on every API request.
const USER_AGENT: &str = concat!("ideaboard/", env!("CARGO_PKG_VERSION"));

const ACCEPT_JSON: &str = "application/json";
const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// Authenticated GitHub profile, as much of it as the login flow needs.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl GithubUser {
    /// Display name, falling back to the login handle.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct EmailEntry {
    email: String,
    primary: bool,
    verified: bool,
}

/// Build the authorize URL the browser is redirected to.
///
/// Requests the `user:email` scope so private primary emails can be read
/// back after the exchange.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    let mut url = Url::parse(AUTHORIZE_URL).expect("authorize endpoint is a valid URL");
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", "user:email");
    url.into()
}

/// Exchange an authorization code for an access token.
pub async fn exchange_code(
    client_id: &str,
    client_secret: &str,
    code: &str,
) -> Result<String, AuthError> {
    let client = reqwest::Client::new();

    let resp = client
        .post(TOKEN_URL)
        .header(reqwest::header::ACCEPT, ACCEPT_JSON)
        .json(&TokenRequest {
            client_id,
            client_secret,
            code,
        })
        .send()
        .await
        .map_err(|e| AuthError::Github(format!("Token exchange failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Github(format!(
            "Token exchange HTTP {status}: {body}"
        )));
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| AuthError::Github(format!("Token response parse error: {e}")))?;

    // GitHub reports bad codes as a 200 with an error body, so the absent
    // field is the real failure signal.
    token
        .access_token
        .ok_or_else(|| AuthError::Github("No access token in response".to_string()))
}

/// Fetch the authenticated user's profile.
///
/// When the profile email is private the emails endpoint is consulted for
/// the primary verified address; failure there degrades to no email rather
/// than failing the login.
pub async fn fetch_user(access_token: &str) -> Result<GithubUser, AuthError> {
    let client = reqwest::Client::new();

    let resp = client
        .get(USER_URL)
        .bearer_auth(access_token)
        .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_V3)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .map_err(|e| AuthError::Github(format!("User fetch failed: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Github(format!("User fetch HTTP {status}: {body}")));
    }

    let mut user: GithubUser = resp
        .json()
        .await
        .map_err(|e| AuthError::Github(format!("User response parse error: {e}")))?;

    if user.email.is_none() {
        user.email = fetch_primary_email(&client, access_token).await;
        debug!(found = user.email.is_some(), "Fetched primary email fallback");
    }

    Ok(user)
}

/// Look up the primary verified email for accounts that hide it from the
/// profile. Any failure yields `None`.
async fn fetch_primary_email(client: &reqwest::Client, access_token: &str) -> Option<String> {
    let resp = client
        .get(EMAILS_URL)
        .bearer_auth(access_token)
        .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_V3)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .ok()?;

    if !resp.status().is_success() {
        return None;
    }

    let emails: Vec<EmailEntry> = resp.json().await.ok()?;
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}
