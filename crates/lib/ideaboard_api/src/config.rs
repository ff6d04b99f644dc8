//! API server configuration.

use thiserror::Error;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty value")]
    MissingVar(&'static str),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for session tokens.
    pub jwt_secret: String,
    /// GitHub OAuth application client ID. Empty disables the GitHub flow.
    pub github_client_id: String,
    /// GitHub OAuth application client secret.
    pub github_client_secret: String,
    /// Externally visible base URL, used to build the OAuth callback URL.
    pub public_base_url: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable               | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `BIND_ADDR`            | `127.0.0.1:3100`                         |
    /// | `DATABASE_URL`         | `postgres://localhost:5432/ideaboard`    |
    /// | `JWT_SECRET`           | required, startup fails without it       |
    /// | `GITHUB_CLIENT_ID`     | empty (GitHub login disabled)            |
    /// | `GITHUB_CLIENT_SECRET` | empty                                    |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3100`                  |
    ///
    /// Every session token is signed with `JWT_SECRET`; a missing or empty
    /// value is a fatal startup error rather than a per-request surprise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3100".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/ideaboard".into()),
            jwt_secret,
            github_client_id: std::env::var("GITHUB_CLIENT_ID").unwrap_or_default(),
            github_client_secret: std::env::var("GITHUB_CLIENT_SECRET").unwrap_or_default(),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3100".into()),
        })
    }

    /// Redirect URI registered with the GitHub OAuth application.
    pub fn github_callback_url(&self) -> String {
        format!("{}/api/auth/github/callback", self.public_base_url)
    }
}
