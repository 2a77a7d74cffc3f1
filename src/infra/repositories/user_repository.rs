//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::user::{self, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to stored credentials.
///
/// Inserts go through `TxUserRepository` so the duplicate check and the
/// insert share a transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }
}
