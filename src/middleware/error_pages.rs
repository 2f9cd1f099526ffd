// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turns error responses into HTML error pages.

use crate::error::ErrorPage;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

/// Render an error page for every 4xx/5xx response.
///
/// Responses built from `AppError` carry an [`ErrorPage`]; other error
/// responses (extractor rejections, missing static files) get a page chosen
/// by status alone.
pub async fn render_error_pages(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let page = response
        .extensions()
        .get::<ErrorPage>()
        .cloned()
        .unwrap_or_else(|| ErrorPage {
            status,
            message: status.canonical_reason().unwrap_or("Error").to_string(),
        });

    match state
        .views
        .render_error(page.status, &page.message, state.config.is_production())
    {
        Ok((status, body)) => (status, Html(body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render error page");
            response
        }
    }
}
