// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitLab API client.
//!
//! Handles:
//! - Authorization-code exchange
//! - Authenticated REST GETs (single page at a time)
//! - Authenticated GraphQL POSTs
//!
//! No retries and no token refresh: every failure is returned to the caller
//! as [`AppError::Upstream`].

use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{GitLabUser, GraphQlResponse};
use crate::config::Config;
use crate::error::AppError;
use crate::session::Credentials;

/// GitLab API client.
#[derive(Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: String,
    client_id: Option<String>,
    client_secret: String,
    redirect_uri: String,
}

impl GitLabClient {
    /// Create a client for the configured GitLab host.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.gitlab_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Browser-facing authorization endpoint.
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth/authorize", self.base_url)
    }

    /// Exchange an authorization code for a token set.
    ///
    /// POST {host}/oauth/token (form encoded, `grant_type=authorization_code`)
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials, AppError> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Client ID is not set")))?;

        let response = self
            .http
            .post(format!("{}/oauth/token", self.base_url))
            .form(&[
                ("client_id", client_id),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| upstream_request_error("Token exchange", e))?;

        check_response_json(response).await
    }

    /// Get the authenticated user's profile.
    pub async fn current_user(&self, creds: &Credentials) -> Result<GitLabUser, AppError> {
        let response = self
            .http
            .get(format!("{}/api/v4/user", self.base_url))
            .header(reqwest::header::AUTHORIZATION, creds.authorization())
            .send()
            .await
            .map_err(|e| upstream_request_error("Profile request", e))?;

        check_response_json(response).await
    }

    /// Fetch one page of a paginated REST collection under `/api/v4`.
    pub async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        creds: &Credentials,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<T>, AppError> {
        let url = format!("{}/api/v4/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, creds.authorization())
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await
            .map_err(|e| upstream_request_error("REST request", e))?;

        check_response_json(response).await
    }

    /// Run a GraphQL query and return its `data` member.
    pub async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        creds: &Credentials,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(format!("{}/api/graphql", self.base_url))
            .header(reqwest::header::AUTHORIZATION, creds.authorization())
            .json(&json!({ "query": query }))
            .send()
            .await
            .map_err(|e| upstream_request_error("GraphQL request", e))?;

        let body: GraphQlResponse<T> = check_response_json(response).await?;

        let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
        match body.data {
            Some(data) => {
                if !messages.is_empty() {
                    tracing::warn!(errors = ?messages, "GraphQL response carried partial errors");
                }
                Ok(data)
            }
            None if messages.is_empty() => Err(AppError::upstream(
                None,
                "GraphQL response contained no data",
            )),
            None => Err(AppError::upstream(None, messages.join("; "))),
        }
    }
}

/// Translate a transport failure (connect error, timeout) into an upstream error.
fn upstream_request_error(what: &str, err: reqwest::Error) -> AppError {
    let err = AppError::from(err);
    match err {
        AppError::Upstream { status, message } => AppError::Upstream {
            status,
            message: format!("{} failed: {}", what, message),
        },
        other => other,
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::upstream(
            Some(status.as_u16()),
            format!("HTTP {}: {}", status, body),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::upstream(None, format!("JSON parse error: {}", e)))
}
