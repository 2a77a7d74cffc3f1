//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use super::cookies::SessionCookieConfig;
use super::views::Views;
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, SessionStore};
use crate::services::{AuthService, CredentialService, ServiceContainer, Services, TaskService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Session auth gate
    pub auth_service: Arc<dyn AuthService>,
    /// User registration and password checks
    pub credential_service: Arc<dyn CredentialService>,
    /// Owner-scoped task operations
    pub task_service: Arc<dyn TaskService>,
    /// Session backend
    pub sessions: Arc<dyn SessionStore>,
    /// Database connection
    pub database: Arc<Database>,
    /// Parsed templates
    pub views: Arc<Views>,
    pub session_cookie: SessionCookieConfig,
}

impl AppState {
    /// Create application state from a database, a session store and config.
    pub fn from_config(
        database: Arc<Database>,
        sessions: Arc<dyn SessionStore>,
        config: &Config,
    ) -> AppResult<Self> {
        let container = Services::from_connection(
            database.get_connection(),
            sessions.clone(),
            config,
        );

        Ok(Self {
            auth_service: container.auth(),
            credential_service: container.credentials(),
            task_service: container.tasks(),
            sessions,
            database,
            views: Arc::new(Views::new()?),
            session_cookie: SessionCookieConfig {
                secure: config.session_cookie_secure,
            },
        })
    }
}
