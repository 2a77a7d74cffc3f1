//! Authentication service - Session-based auth gate.
//!
//! Login creates a server-side session; every protected request resolves its
//! session id back to a live session whose user still exists.

use async_trait::async_trait;
use std::sync::Arc;

use super::CredentialService;
use crate::domain::Session;
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UnitOfWork};

/// Auth gate operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and start a session
    async fn login(&self, username: String, password: String) -> AppResult<Session>;

    /// End a session; ending an unknown session is not an error
    async fn logout(&self, session_id: &str) -> AppResult<()>;

    /// Resolve a session id to a live session, or `Unauthenticated`
    async fn require_auth(&self, session_id: Option<&str>) -> AppResult<Session>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    credentials: Arc<dyn CredentialService>,
    sessions: Arc<dyn SessionStore>,
    session_ttl_seconds: u64,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(
        uow: Arc<U>,
        credentials: Arc<dyn CredentialService>,
        sessions: Arc<dyn SessionStore>,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            uow,
            credentials,
            sessions,
            session_ttl_seconds,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, username: String, password: String) -> AppResult<Session> {
        let user = match self.credentials.authenticate(username, password).await {
            Ok(user) => user,
            Err(e) => {
                if matches!(e, AppError::InvalidCredentials) {
                    tracing::info!("Login failed: invalid credentials");
                }
                return Err(e);
            }
        };

        let session = Session::new(user.id, user.username);
        self.sessions
            .insert(&session, self.session_ttl_seconds)
            .await?;

        tracing::info!(user_id = session.user_id, "User logged in");
        Ok(session)
    }

    async fn logout(&self, session_id: &str) -> AppResult<()> {
        self.sessions.remove(session_id).await?;
        tracing::info!("Session ended");
        Ok(())
    }

    async fn require_auth(&self, session_id: Option<&str>) -> AppResult<Session> {
        let session_id = session_id.ok_or(AppError::Unauthenticated)?;

        let session = self
            .sessions
            .get(session_id)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        // The user row is re-read on every request
        if self.uow.users().find_by_id(session.user_id).await?.is_none() {
            tracing::warn!(user_id = session.user_id, "Session refers to a missing user");
            self.sessions.remove(session_id).await?;
            return Err(AppError::Unauthenticated);
        }

        Ok(session)
    }
}
