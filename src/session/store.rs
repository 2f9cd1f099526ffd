// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session storage backends.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use super::SessionData;

/// Idle lifetime of an in-memory session.
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session backend error: {0}")]
    Backend(String),
}

/// Key-value store for session records, keyed by the cookie value.
///
/// Concurrent writes to the same id are not coordinated: the last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &str) -> Result<Option<SessionData>, SessionStoreError>;
    async fn save(&self, id: &str, data: &SessionData) -> Result<(), SessionStoreError>;
    async fn destroy(&self, id: &str) -> Result<(), SessionStoreError>;
}

struct StoredSession {
    data: SessionData,
    expires_at: DateTime<Utc>,
}

/// Process-local session store.
pub struct MemorySessionStore {
    entries: DashMap<String, StoredSession>,
    ttl: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, session| session.expires_at > now);
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionData>, SessionStoreError> {
        let now = Utc::now();

        if let Some(entry) = self.entries.get(id) {
            if entry.expires_at > now {
                return Ok(Some(entry.data.clone()));
            }
        } else {
            return Ok(None);
        }

        // Expired - drop it so the map does not grow without bound.
        self.entries.remove(id);
        Ok(None)
    }

    async fn save(&self, id: &str, data: &SessionData) -> Result<(), SessionStoreError> {
        // Sessions that are never loaded again are only reclaimed here.
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired sessions");
        }

        self.entries.insert(
            id.to_string(),
            StoredSession {
                data: data.clone(),
                expires_at: Utc::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn destroy(&self, id: &str) -> Result<(), SessionStoreError> {
        self.entries.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_destroy() {
        let store = MemorySessionStore::default();
        let data = SessionData {
            state: Some("nonce".to_string()),
            ..Default::default()
        };

        store.save("sid", &data).await.unwrap();
        let loaded = store.load("sid").await.unwrap().unwrap();
        assert_eq!(loaded.state.as_deref(), Some("nonce"));

        store.destroy("sid").await.unwrap();
        assert!(store.load("sid").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = MemorySessionStore::new(Duration::seconds(-1));
        store.save("sid", &SessionData::default()).await.unwrap();

        assert!(store.load("sid").await.unwrap().is_none());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_save_reclaims_abandoned_sessions() {
        let store = MemorySessionStore::new(Duration::seconds(-1));
        for i in 0..500 {
            store
                .save(&format!("sid-{i}"), &SessionData::default())
                .await
                .unwrap();
        }

        // Only the entry written last survives until the next save.
        assert_eq!(store.len(), 1);
        assert_eq!(store.purge_expired(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_purge_keeps_live_sessions() {
        let store = MemorySessionStore::default();
        store.save("a", &SessionData::default()).await.unwrap();
        store.save("b", &SessionData::default()).await.unwrap();

        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let store = MemorySessionStore::default();
        for nonce in ["first", "second"] {
            let data = SessionData {
                state: Some(nonce.to_string()),
                ..Default::default()
            };
            store.save("sid", &data).await.unwrap();
        }

        let loaded = store.load("sid").await.unwrap().unwrap();
        assert_eq!(loaded.state.as_deref(), Some("second"));
    }
}
