// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab OAuth2 authorization-code flow.
//!
//! Login moves a session through three stages:
//!
//! ```text
//! Unauthenticated --complete_authorization--> TokenObtained --load_profile--> ProfileLoaded
//! ```
//!
//! Each transition is a plain async function returning `Result`, and the
//! session is only written once the final stage is reached, so a stored
//! session never holds credentials without a profile.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::gitlab::GitLabClient;
use crate::session::{random_token, Credentials, SessionData, UserProfile};

/// Scopes requested from GitLab.
pub const SCOPES: [&str; 4] = ["read_api", "read_user", "read_repository", "openid"];

/// Bytes of entropy in the CSRF nonce.
const STATE_BYTES: usize = 16;

/// Where a session currently is in the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Unauthenticated,
    TokenObtained,
    ProfileLoaded,
}

impl AuthStage {
    pub fn of(session: &SessionData) -> Self {
        match (&session.creds, &session.user) {
            (Some(_), Some(_)) => AuthStage::ProfileLoaded,
            (Some(_), None) => AuthStage::TokenObtained,
            _ => AuthStage::Unauthenticated,
        }
    }
}

/// Credentials obtained from the token endpoint, profile not yet fetched.
#[derive(Debug, Clone)]
pub struct TokenObtained {
    pub creds: Credentials,
}

/// Completed login, ready to be written to the session.
#[derive(Debug, Clone)]
pub struct ProfileLoaded {
    pub creds: Credentials,
    pub user: UserProfile,
}

impl ProfileLoaded {
    /// Store credentials and profile in the session.
    pub fn store(self, session: &mut SessionData) {
        session.creds = Some(self.creds);
        session.user = Some(self.user);
    }
}

/// Generate a fresh CSRF nonce.
pub fn generate_state() -> Result<String> {
    Ok(random_token(STATE_BYTES)?)
}

/// Make sure the session has a nonce to put in the login link, creating one
/// if needed. Returns the nonce.
pub fn ensure_state(session: &mut SessionData) -> Result<String> {
    if let Some(state) = &session.state {
        return Ok(state.clone());
    }
    let state = generate_state()?;
    session.state = Some(state.clone());
    Ok(state)
}

/// Start a login: check the caller's nonce and return the GitLab
/// authorization URL to redirect to.
///
/// A request without `state` is accepted only while the session has no
/// nonce either (first visit). On success the session gets a new nonce,
/// which GitLab will echo back to the callback.
pub fn initiate_authorization(
    session: &mut SessionData,
    query_state: Option<&str>,
    config: &Config,
    authorize_endpoint: &str,
) -> Result<String> {
    let matches = match (session.state.as_deref(), query_state) {
        (None, None) => true,
        (Some(expected), Some(actual)) => expected == actual,
        _ => false,
    };
    if !matches {
        return Err(AppError::BadRequest("OAuth state mismatch".to_string()));
    }

    let client_id = config
        .client_id
        .as_deref()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Client ID is not set")))?;

    let state = generate_state()?;
    session.state = Some(state.clone());

    Ok(format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&state={}&scope={}",
        authorize_endpoint,
        urlencoding::encode(client_id),
        urlencoding::encode(&config.redirect_uri),
        state,
        SCOPES.join("+"),
    ))
}

/// Check the `state` GitLab echoed back to the callback.
pub fn verify_callback_state(session: &SessionData, query_state: Option<&str>) -> Result<()> {
    match (session.state.as_deref(), query_state) {
        (Some(expected), Some(actual)) if expected == actual => Ok(()),
        _ => {
            tracing::warn!("OAuth callback state mismatch");
            Err(AppError::BadRequest("OAuth state mismatch".to_string()))
        }
    }
}

/// Exchange the authorization code for a token set.
pub async fn complete_authorization(client: &GitLabClient, code: &str) -> Result<TokenObtained> {
    if code.is_empty() {
        return Err(AppError::BadRequest("Missing authorization code".to_string()));
    }

    let creds = client.exchange_code(code).await?;
    tracing::info!(token_type = %creds.token_type, "Authorization code exchanged");
    Ok(TokenObtained { creds })
}

/// Fetch the GitLab profile belonging to the obtained token.
pub async fn load_profile(client: &GitLabClient, stage: TokenObtained) -> Result<ProfileLoaded> {
    if stage.creds.access_token.is_empty() {
        return Err(AppError::Unauthorized("Access token missing".to_string()));
    }

    let user: UserProfile = client.current_user(&stage.creds).await?.into();
    tracing::info!(user_id = user.id, username = %user.username, "GitLab profile loaded");

    Ok(ProfileLoaded {
        creds: stage.creds,
        user,
    })
}

/// Gate for protected routes.
///
/// No credentials at all is `Forbidden`; credentials whose lifetime has run
/// out (`created_at + expires_in <= now`) are `Unauthorized`.
pub fn check_authentication(session: &SessionData, now: i64) -> Result<&Credentials> {
    let creds = session.creds.as_ref().ok_or(AppError::Forbidden)?;

    if creds.expires_at() <= now {
        return Err(AppError::Unauthorized("Session expired".to_string()));
    }

    Ok(creds)
}
