// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab Dashboard server
//!
//! Logs users in with GitLab OAuth2 and renders their profile, recent
//! activity and groups.

use gitlab_dashboard::{
    config::Config, gitlab::GitLabClient, session::MemorySessionStore, views::Views, AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        gitlab = %config.gitlab_url,
        environment = ?config.environment,
        "Starting GitLab Dashboard"
    );
    if config.client_id.is_none() {
        tracing::warn!("APP_ID is not set; logins will fail");
    }

    let gitlab = GitLabClient::new(&config)?;
    let views = Views::new(&config.base_url).expect("Failed to load templates");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        gitlab,
        sessions: Arc::new(MemorySessionStore::default()),
        views,
    });

    // Build router
    let app = gitlab_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gitlab_dashboard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
