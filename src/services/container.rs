//! Service Container - Centralized service access.
//!
//! Wires the Unit of Work, the session store and the services on top of
//! them, and hands out trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CredentialManager, CredentialService, TaskManager, TaskService,
};
use crate::config::Config;
use crate::infra::{Persistence, SessionStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication (session) service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get credential service
    fn credentials(&self) -> Arc<dyn CredentialService>;

    /// Get task service
    fn tasks(&self) -> Arc<dyn TaskService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    credential_service: Arc<dyn CredentialService>,
    task_service: Arc<dyn TaskService>,
}

impl Services {
    /// Create service container from database connection, session store and config
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        sessions: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let credential_service: Arc<dyn CredentialService> =
            Arc::new(CredentialManager::new(uow.clone()));
        let auth_service = Arc::new(Authenticator::new(
            uow.clone(),
            credential_service.clone(),
            sessions,
            config.session_ttl_seconds,
        ));
        let task_service = Arc::new(TaskManager::new(uow));

        Self {
            auth_service,
            credential_service,
            task_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn credentials(&self) -> Arc<dyn CredentialService> {
        self.credential_service.clone()
    }

    fn tasks(&self) -> Arc<dyn TaskService> {
        self.task_service.clone()
    }
}
