// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::redirect_found;
use crate::error::{AppError, Result};
use crate::services::oauth;
use crate::session::extract::removal_cookie;
use crate::session::Session;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/initiateOAuth", get(initiate_oauth))
        .route("/auth/gitlab/callback", get(oauth_callback))
        .route("/auth/logout", get(logout))
}

/// Query parameters for starting OAuth flow.
#[derive(Deserialize)]
pub struct InitiateParams {
    /// Nonce from the login link
    #[serde(default)]
    state: Option<String>,
}

/// Start OAuth flow - redirect to GitLab authorization.
async fn initiate_oauth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut session: Session,
    Query(params): Query<InitiateParams>,
) -> Result<(CookieJar, Response)> {
    let auth_url = oauth::initiate_authorization(
        &mut session.data,
        params.state.as_deref(),
        &state.config,
        &state.gitlab.authorize_endpoint(),
    )?;

    let jar = session
        .save(state.sessions.as_ref(), jar, &state.config)
        .await?;

    tracing::info!(gitlab = %state.gitlab.base_url(), "Starting OAuth flow, redirecting to GitLab");

    Ok((jar, redirect_found(&auth_url)))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for tokens, load the profile, log in.
async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Response)> {
    oauth::verify_callback_state(&session.data, params.state.as_deref())?;

    // GitLab redirects back with `error` when the user denies access.
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from GitLab");
        return Err(AppError::BadRequest(format!(
            "GitLab authorization failed: {}",
            error
        )));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    let token = oauth::complete_authorization(&state.gitlab, &code).await?;
    let loaded = oauth::load_profile(&state.gitlab, token).await?;
    loaded.store(&mut session.data);

    let jar = session
        .save(state.sessions.as_ref(), jar, &state.config)
        .await?;

    tracing::info!("OAuth successful, session established");

    Ok((jar, redirect_found(&state.config.base_url)))
}

/// Logout - destroy the session, clear the cookie, go back to the start page.
///
/// The cookie is cleared and the redirect sent even when the store fails to
/// destroy the record.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Response) {
    let session_id = jar
        .get(&state.config.session_name)
        .map(|cookie| cookie.value().to_string());

    if let Some(id) = session_id {
        match state.sessions.destroy(&id).await {
            Ok(()) => tracing::info!("Session destroyed"),
            Err(e) => tracing::error!(
                error = %e,
                "Failed to destroy session during logout; clearing cookie anyway"
            ),
        }
    }

    (
        jar.remove(removal_cookie(&state.config)),
        redirect_found(&state.config.base_url),
    )
}
