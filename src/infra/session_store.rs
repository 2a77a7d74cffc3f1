//! Server-side session storage.
//!
//! The cookie carries only an opaque id; the session record lives here.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::cache::Cache;
use crate::domain::Session;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session persistence backend.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a session for `ttl_seconds`
    async fn insert(&self, session: &Session, ttl_seconds: u64) -> AppResult<()>;

    /// Look up a live session
    async fn get(&self, session_id: &str) -> AppResult<Option<Session>>;

    /// Remove a session; unknown ids are ignored
    async fn remove(&self, session_id: &str) -> AppResult<()>;

    /// Check that the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Redis-backed sessions, shared across server instances.
pub struct RedisSessionStore {
    cache: Cache,
}

impl RedisSessionStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn insert(&self, session: &Session, ttl_seconds: u64) -> AppResult<()> {
        self.cache
            .set_session(&session.id, session, ttl_seconds)
            .await
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        self.cache.get_session(session_id).await
    }

    async fn remove(&self, session_id: &str) -> AppResult<()> {
        self.cache.delete_session(session_id).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.cache.exists("health:ping").await.map(|_| ())
    }
}

/// Process-local sessions for single-instance deployments and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, (Session, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session, ttl_seconds: u64) -> AppResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        let mut sessions = self.sessions.write().await;
        // Drop expired entries while holding the write lock anyway
        sessions.retain(|_, (_, expiry)| *expiry > Instant::now());
        sessions.insert(session.id.clone(), (session.clone(), expires_at));
        Ok(())
    }

    async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|(_, expiry)| *expiry > Instant::now())
            .map(|(session, _)| session.clone()))
    }

    async fn remove(&self, session_id: &str) -> AppResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
