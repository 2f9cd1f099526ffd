// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! GitLab Dashboard: browse your GitLab profile, activity and groups
//!
//! This crate provides a server-rendered web application that logs users in
//! through GitLab OAuth2 and shows data fetched from GitLab's REST and
//! GraphQL APIs on their behalf.

pub mod config;
pub mod error;
pub mod gitlab;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod time_utils;
pub mod views;

use config::Config;
use gitlab::GitLabClient;
use session::SessionStore;
use std::sync::Arc;
use views::Views;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub gitlab: GitLabClient,
    pub sessions: Arc<dyn SessionStore>,
    pub views: Views,
}
