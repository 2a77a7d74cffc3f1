//! Credential service - Registers users and verifies their passwords.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_username, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Credential store operations.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with `InvalidInput` when either field is empty and with
    /// `DuplicateUsername` when the name is taken.
    async fn register(&self, username: String, password: String) -> AppResult<User>;

    /// Verify a username/password pair.
    async fn authenticate(&self, username: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of CredentialService using Unit of Work.
pub struct CredentialManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CredentialManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CredentialService for CredentialManager<U> {
    async fn register(&self, username: String, password: String) -> AppResult<User> {
        let username = normalize_username(&username)?;
        let password_hash = Password::new(&password)?.into_string();

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    if users.find_by_username(&username).await?.is_some() {
                        return Err(AppError::DuplicateUsername);
                    }
                    users.create(username, password_hash).await
                })
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, username: String, password: String) -> AppResult<User> {
        let found = self.uow.users().find_by_username(username.trim()).await?;

        match found {
            Some(user) if Password::from_hash(user.password_hash.clone()).verify(&password) => {
                Ok(user)
            }
            Some(_) => Err(AppError::InvalidCredentials),
            None => {
                // Unknown user: pay for a verification anyway
                Password::verify_dummy(&password);
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestUnitOfWork;
    use crate::infra::{MockTaskRepository, MockUserRepository};

    fn stored_user(password: &str) -> User {
        User::new(
            1,
            "alice".to_string(),
            Password::new(password).unwrap().into_string(),
        )
    }

    fn manager(users: MockUserRepository) -> CredentialManager<TestUnitOfWork> {
        CredentialManager::new(Arc::new(TestUnitOfWork::new(
            users,
            MockTaskRepository::new(),
        )))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .returning(|_| Ok(Some(stored_user("pw1"))));

        let user = manager(users)
            .authenticate("alice".to_string(), "pw1".to_string())
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_trims_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .returning(|_| Ok(Some(stored_user("pw1"))));

        let result = manager(users)
            .authenticate(" alice ".to_string(), "pw1".to_string())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("pw1"))));

        let result = manager(users)
            .authenticate("alice".to_string(), "wrong".to_string())
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let result = manager(users)
            .authenticate("nobody".to_string(), "pw1".to_string())
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields_before_storage() {
        // No expectations: the repository must not be touched
        let service = manager(MockUserRepository::new());

        let empty_name = service.register("".to_string(), "pw1".to_string()).await;
        assert!(matches!(empty_name, Err(AppError::InvalidInput(_))));

        let empty_password = service.register("alice".to_string(), "".to_string()).await;
        assert!(matches!(empty_password, Err(AppError::InvalidInput(_))));
    }
}
