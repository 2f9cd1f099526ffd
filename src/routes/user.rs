// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pages for the logged-in user.

use crate::error::Result;
use crate::middleware::AuthContext;
use crate::models::ProfileView;
use crate::services::{fetch_groups_with_projects, fetch_recent_activities};
use crate::AppState;
use axum::{extract::State, response::Html, routing::get, Extension, Router};
use minijinja::context;
use std::sync::Arc;

/// User routes (require authentication).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/profile", get(show_profile))
        .route("/user/activities", get(show_activities))
        .route("/user/group-projects", get(show_group_projects))
}

async fn show_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Html<String>> {
    let profile = ProfileView::from(&auth.user);
    state.views.render(
        "profile.html",
        context! {
            user => &profile,
            profile => &profile,
        },
    )
}

async fn show_activities(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Html<String>> {
    let activities = fetch_recent_activities(&state.gitlab, auth.session()).await?;

    state.views.render(
        "activities.html",
        context! {
            user => ProfileView::from(&auth.user),
            activities => activities,
        },
    )
}

async fn show_group_projects(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Html<String>> {
    let overview = fetch_groups_with_projects(&state.gitlab, &auth.creds).await?;

    state.views.render(
        "group_projects.html",
        context! {
            user => ProfileView::from(&auth.user),
            overview => overview,
        },
    )
}
