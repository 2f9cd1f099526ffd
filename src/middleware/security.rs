// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Content-Security-Policy for the rendered pages. Images may come from the
/// GitLab host (avatars) and Gravatar.
pub fn content_security_policy(gitlab_url: &str) -> String {
    format!(
        "default-src 'self'; script-src 'self' cdn.jsdelivr.net; \
         img-src 'self' {} *.gravatar.com data:; frame-ancestors 'none'",
        gitlab_url
    )
}

/// Add security headers to all responses.
pub async fn add_security_headers(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    if state.config.is_production() {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }
    match HeaderValue::from_str(&content_security_policy(&state.config.gitlab_url)) {
        Ok(csp) => {
            headers.insert("Content-Security-Policy", csp);
        }
        Err(e) => tracing::warn!(error = %e, "Invalid Content-Security-Policy value"),
    }
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        "Cross-Origin-Resource-Policy",
        HeaderValue::from_static("cross-origin"),
    );

    response
}
