// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie-keyed server-side sessions.
//!
//! The browser only holds an opaque session id. Everything else (the OAuth
//! `state` nonce, the GitLab token set and the profile snapshot) lives in a
//! [`SessionStore`] under that id.

pub mod extract;
pub mod store;

pub use extract::Session;
pub use store::{MemorySessionStore, SessionStore, SessionStoreError};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

/// Everything stored for one browser session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// CSRF nonce for the OAuth round trip
    #[serde(default)]
    pub state: Option<String>,
    /// Token set returned by the GitLab token endpoint
    #[serde(default)]
    pub creds: Option<Credentials>,
    /// Profile snapshot taken right after login
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl SessionData {
    /// Borrow the credentials and profile together, if login has completed.
    pub fn authenticated(&self) -> Option<AuthenticatedSession<'_>> {
        match (&self.creds, &self.user) {
            (Some(creds), Some(user)) => Some(AuthenticatedSession { creds, user }),
            _ => None,
        }
    }
}

/// A session that has completed login.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedSession<'a> {
    pub creds: &'a Credentials,
    pub user: &'a UserProfile,
}

/// OAuth token response, stored as GitLab sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Issue time (Unix seconds)
    pub created_at: i64,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Remaining fields of the token response (`scope`, `id_token`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Credentials {
    /// Unix time at which the access token stops being valid.
    pub fn expires_at(&self) -> i64 {
        self.created_at.saturating_add(self.expires_in)
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Profile subset kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub email: Option<String>,
    pub name: String,
    pub username: String,
    pub avatar: Option<String>,
    pub last_activity_on: Option<String>,
}

/// Random URL-safe token of `len` bytes of entropy.
pub fn random_token(len: usize) -> anyhow::Result<String> {
    let mut bytes = vec![0u8; len];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("System RNG failure"))?;
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}
