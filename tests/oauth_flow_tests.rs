// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth login flow tests.
//!
//! A wiremock server stands in for the GitLab host so the full
//! initiate -> callback -> token exchange -> profile chain runs end to end.

use axum::http::{header, StatusCode};
use gitlab_dashboard::session::SessionData;
use gitlab_dashboard::time_utils::now_epoch_secs;
use serde_json::json;
use tower::ServiceExt;
use wiremock::{
    matchers::{body_string_contains, header as header_is, method, path},
    Mock, MockServer, ResponseTemplate,
};

mod common;

fn session_with_state(state: &str) -> SessionData {
    SessionData {
        state: Some(state.to_string()),
        ..Default::default()
    }
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code"))
        .and(body_string_contains("client_id=test_client_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gitlab_access_token",
            "token_type": "Bearer",
            "expires_in": 7200,
            "refresh_token": "gitlab_refresh_token",
            "scope": "read_api read_user read_repository openid",
            "created_at": now_epoch_secs(),
            "id_token": "header.payload.signature"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_home_seeds_state_for_login_link() {
    let server = MockServer::start().await;
    let (app, state) = common::create_test_app(&server.uri());

    let response = app.oneshot(common::get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = common::set_cookie_headers(&response);
    let cookie = cookies
        .iter()
        .find(|value| value.starts_with("test_sid="))
        .expect("session cookie");
    let session_id = cookie
        .split(';')
        .next()
        .unwrap()
        .trim_start_matches("test_sid=");

    let stored = state.sessions.load(session_id).await.unwrap().unwrap();
    let nonce = stored.state.expect("state nonce");

    let body = common::body_string(response).await;
    assert!(body.contains(&format!("/auth/initiateOAuth?state={}", nonce)));
}

#[tokio::test]
async fn test_initiate_redirects_to_gitlab() {
    let server = MockServer::start().await;
    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("nonce")).await;

    let response = app
        .oneshot(common::get("/auth/initiateOAuth?state=nonce", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);

    let location = location(&response);
    assert!(location.starts_with(&format!(
        "{}/oauth/authorize?client_id=test_client_id",
        server.uri()
    )));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("scope=read_api+read_user+read_repository+openid"));

    let new_state = common::stored_session(&state).await.unwrap().state.unwrap();
    assert_ne!(new_state, "nonce");
    assert!(location.contains(&format!("state={}", new_state)));
}

#[tokio::test]
async fn test_initiate_state_mismatch_is_bad_request() {
    let server = MockServer::start().await;
    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("nonce")).await;

    let response = app
        .oneshot(common::get("/auth/initiateOAuth?state=forged", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_string(response).await;
    assert!(body.contains("400 - Bad request"));

    // The nonce survives a rejected attempt.
    let stored = common::stored_session(&state).await.unwrap();
    assert_eq!(stored.state.as_deref(), Some("nonce"));
}

#[tokio::test]
async fn test_initiate_without_client_id_is_internal_error() {
    let server = MockServer::start().await;
    let config = gitlab_dashboard::config::Config {
        client_id: None,
        ..common::test_config(&server.uri())
    };
    let (app, state) = common::create_test_app_with(
        config,
        std::sync::Arc::new(gitlab_dashboard::session::MemorySessionStore::default()),
    );
    let cookie = common::seed_session(&state, session_with_state("nonce")).await;

    let response = app
        .oneshot(common::get("/auth/initiateOAuth?state=nonce", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_callback_logs_user_in() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .and(header_is("authorization", "Bearer gitlab_access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "username": "ada",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "avatar_url": "https://gitlab.example.com/uploads/ada.png",
            "last_activity_on": "2024-03-05",
            "state": "active"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("s1")).await;

    let response = app
        .clone()
        .oneshot(common::get(
            "/auth/gitlab/callback?code=auth-code&state=s1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let stored = common::stored_session(&state).await.unwrap();
    let creds = stored.creds.expect("credentials stored");
    assert_eq!(creds.access_token, "gitlab_access_token");
    assert_eq!(creds.expires_in, 7200);
    assert_eq!(
        creds.extra.get("id_token").and_then(|v| v.as_str()),
        Some("header.payload.signature")
    );

    let user = stored.user.expect("profile stored");
    assert_eq!(user.id, 42);
    assert_eq!(user.username, "ada");
    assert_eq!(
        user.avatar.as_deref(),
        Some("https://gitlab.example.com/uploads/ada.png")
    );

    // The same cookie now opens protected pages.
    let response = app
        .oneshot(common::get("/user/profile", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_string(response).await;
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("ada@example.com"));
}

#[tokio::test]
async fn test_callback_state_mismatch_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("s1")).await;

    let response = app
        .oneshot(common::get(
            "/auth/gitlab/callback?code=auth-code&state=other",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(common::stored_session(&state).await.unwrap().creds.is_none());
}

#[tokio::test]
async fn test_callback_access_denied() {
    let server = MockServer::start().await;
    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("s1")).await;

    let response = app
        .oneshot(common::get(
            "/auth/gitlab/callback?error=access_denied&state=s1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_token_exchange_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("s1")).await;

    let response = app
        .oneshot(common::get(
            "/auth/gitlab/callback?code=auth-code&state=s1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    // Upstream status is mirrored.
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(common::stored_session(&state).await.unwrap().creds.is_none());
}

#[tokio::test]
async fn test_callback_profile_failure_keeps_session_logged_out() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v4/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (app, state) = common::create_test_app(&server.uri());
    let cookie = common::seed_session(&state, session_with_state("s1")).await;

    let response = app
        .oneshot(common::get(
            "/auth/gitlab/callback?code=auth-code&state=s1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let stored = common::stored_session(&state).await.unwrap();
    assert!(stored.creds.is_none());
    assert!(stored.user.is_none());
}
