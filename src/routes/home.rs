// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Start page.

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use std::sync::Arc;

use crate::error::Result;
use crate::models::ProfileView;
use crate::services::oauth;
use crate::session::Session;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

/// Start page with the login link, or a greeting once logged in.
///
/// First-time visitors get a session holding a fresh `state` nonce, which the
/// login link carries to `/auth/initiateOAuth`.
async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut session: Session,
) -> Result<(CookieJar, Html<String>)> {
    let had_state = session.data.state.is_some();
    let nonce = oauth::ensure_state(&mut session.data)?;

    let jar = if had_state {
        jar
    } else {
        session
            .save(state.sessions.as_ref(), jar, &state.config)
            .await?
    };

    let user = session.data.user.as_ref().map(ProfileView::from);
    let page = state.views.render(
        "home.html",
        context! {
            state => nonce,
            user => user,
        },
    )?;

    Ok((jar, page))
}
