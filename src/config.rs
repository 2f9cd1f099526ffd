// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default upstream GitLab host.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.lnu.se";

/// Deployment environment, selected by `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitLab OAuth application id (`APP_ID`). Checked when a login starts.
    pub client_id: Option<String>,
    /// GitLab OAuth application secret
    pub client_secret: String,
    /// Callback URL registered with the GitLab application
    pub redirect_uri: String,
    /// Name of the session cookie
    pub session_name: String,
    /// Server port
    pub port: u16,
    /// Link prefix handed to the views
    pub base_url: String,
    pub environment: Environment,
    /// GitLab host, e.g. `https://gitlab.lnu.se`
    pub gitlab_url: String,
    /// Per-request timeout for upstream calls
    pub upstream_timeout: Duration,
    /// Directory served under `/public`
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            client_id: env::var("APP_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            client_secret: env::var("GITLAB_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GITLAB_CLIENT_SECRET"))?,
            redirect_uri: env::var("REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("REDIRECT_URI"))?,
            session_name: env::var("SESSION_NAME")
                .unwrap_or_else(|_| "gitlab_dashboard_sid".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            base_url: env::var("BASE_URL").unwrap_or_else(|_| "/".to_string()),
            environment: Environment::from_value(&env::var("NODE_ENV").unwrap_or_default()),
            gitlab_url: env::var("GITLAB_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GITLAB_URL.to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Complete configuration for tests.
    pub fn test_default() -> Self {
        Self {
            client_id: Some("test_client_id".to_string()),
            client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:8080/auth/gitlab/callback".to_string(),
            session_name: "test_sid".to_string(),
            port: 8080,
            base_url: "/".to_string(),
            environment: Environment::Development,
            gitlab_url: DEFAULT_GITLAB_URL.to_string(),
            upstream_timeout: Duration::from_secs(5),
            static_dir: "public".to_string(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
