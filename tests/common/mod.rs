// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use gitlab_dashboard::config::Config;
use gitlab_dashboard::gitlab::GitLabClient;
use gitlab_dashboard::routes::create_router;
use gitlab_dashboard::session::{
    Credentials, MemorySessionStore, SessionData, SessionStore, UserProfile,
};
use gitlab_dashboard::time_utils::now_epoch_secs;
use gitlab_dashboard::views::Views;
use gitlab_dashboard::AppState;
use std::sync::Arc;

pub const SESSION_ID: &str = "test-session-id";

/// Test configuration pointing at `gitlab_url` (usually a wiremock server).
#[allow(dead_code)]
pub fn test_config(gitlab_url: &str) -> Config {
    Config {
        gitlab_url: gitlab_url.to_string(),
        ..Config::test_default()
    }
}

/// Create a test app with an in-memory session store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(gitlab_url: &str) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(
        test_config(gitlab_url),
        Arc::new(MemorySessionStore::default()),
    )
}

/// Create a test app with a custom config and session store.
pub fn create_test_app_with(
    config: Config,
    sessions: Arc<dyn SessionStore>,
) -> (axum::Router, Arc<AppState>) {
    let gitlab = GitLabClient::new(&config).expect("client");
    let views = Views::new(&config.base_url).expect("templates");

    let state = Arc::new(AppState {
        config,
        gitlab,
        sessions,
        views,
    });

    (create_router(state.clone()), state)
}

/// Store `data` under [`SESSION_ID`] and return the matching `Cookie` header value.
#[allow(dead_code)]
pub async fn seed_session(state: &AppState, data: SessionData) -> String {
    state.sessions.save(SESSION_ID, &data).await.unwrap();
    format!("{}={}", state.config.session_name, SESSION_ID)
}

#[allow(dead_code)]
pub async fn stored_session(state: &AppState) -> Option<SessionData> {
    state.sessions.load(SESSION_ID).await.unwrap()
}

#[allow(dead_code)]
pub fn test_credentials(created_at: i64, expires_in: i64) -> Credentials {
    Credentials {
        access_token: "test_access_token".to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: Some("test_refresh_token".to_string()),
        created_at,
        expires_in,
        extra: Default::default(),
    }
}

#[allow(dead_code)]
pub fn test_user() -> UserProfile {
    UserProfile {
        id: 42,
        email: Some("ada@example.com".to_string()),
        name: "Ada Lovelace".to_string(),
        username: "ada".to_string(),
        avatar: None,
        last_activity_on: Some("2024-03-05".to_string()),
    }
}

/// Session data for a user who logged in just now.
#[allow(dead_code)]
pub fn logged_in_session() -> SessionData {
    SessionData {
        state: Some("nonce".to_string()),
        creds: Some(test_credentials(now_epoch_secs(), 7200)),
        user: Some(test_user()),
    }
}

/// GET `uri`, optionally with a `Cookie` header.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}
