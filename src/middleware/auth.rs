// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication gate for protected routes.

use crate::error::{AppError, Result};
use crate::services::{check_authentication, AuthStage};
use crate::session::{AuthenticatedSession, Credentials, Session, UserProfile};
use crate::time_utils::now_epoch_secs;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Logged-in user, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub creds: Credentials,
    pub user: UserProfile,
}

impl AuthContext {
    pub fn session(&self) -> AuthenticatedSession<'_> {
        AuthenticatedSession {
            creds: &self.creds,
            user: &self.user,
        }
    }
}

/// Middleware that requires a logged-in, unexpired session.
///
/// - no credentials: 403
/// - expired credentials: 401
/// - credentials without a profile: 401
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let session = Session::load(state.sessions.as_ref(), &jar, &state.config).await?;
    if let Err(e) = check_authentication(&session.data, now_epoch_secs()) {
        tracing::debug!(
            stage = ?AuthStage::of(&session.data),
            path = %request.uri().path(),
            "Rejecting unauthenticated request"
        );
        return Err(e);
    }

    let auth = session.data.authenticated().ok_or_else(|| {
        tracing::warn!(stage = ?AuthStage::of(&session.data), "Session has credentials but no profile");
        AppError::Unauthorized("Profile not loaded".to_string())
    })?;

    request.extensions_mut().insert(AuthContext {
        creds: auth.creds.clone(),
        user: auth.user.clone(),
    });

    Ok(next.run(request).await)
}
