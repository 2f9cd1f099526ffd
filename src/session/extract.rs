// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request extractor that loads the caller's session.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use super::{random_token, SessionData, SessionStore};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::AppState;

/// Bytes of entropy in a session id.
const SESSION_ID_BYTES: usize = 32;

/// The caller's session record plus the id it is stored under.
///
/// Changes to `data` are only kept once [`Session::save`] is called.
#[derive(Debug, Clone, Default)]
pub struct Session {
    id: Option<String>,
    pub data: SessionData,
}

impl Session {
    /// Load the session named by the request's session cookie.
    ///
    /// A missing cookie, or a cookie naming a record the store no longer has,
    /// yields a fresh unsaved session.
    pub async fn load(store: &dyn SessionStore, jar: &CookieJar, config: &Config) -> Result<Self> {
        let Some(id) = jar
            .get(&config.session_name)
            .map(|cookie| cookie.value().to_string())
        else {
            return Ok(Self::default());
        };

        match store.load(&id).await? {
            Some(data) => Ok(Self { id: Some(id), data }),
            None => Ok(Self::default()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Persist the session, allocating an id if it has none yet.
    ///
    /// Returns the cookie jar with the session cookie set.
    pub async fn save(
        &mut self,
        store: &dyn SessionStore,
        jar: CookieJar,
        config: &Config,
    ) -> Result<CookieJar> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let id = random_token(SESSION_ID_BYTES)?;
                self.id = Some(id.clone());
                id
            }
        };

        store.save(&id, &self.data).await?;
        Ok(jar.add(session_cookie(config, id)))
    }
}

/// Session cookie carrying `value`.
pub fn session_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build((config.session_name.clone(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.is_production())
        .build()
}

/// Cookie that, when passed to `CookieJar::remove`, clears the session cookie.
///
/// Path must match the one used in [`session_cookie`] or browsers keep the old one.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((config.session_name.clone(), ""))
        .path("/")
        .build()
}

impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Session::load(state.sessions.as_ref(), &jar, &state.config).await
    }
}
