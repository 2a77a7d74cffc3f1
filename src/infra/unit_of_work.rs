//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-statement
//! operations (signup's check-then-insert) inside one database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::user::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use super::repositories::{TaskRepository, TaskStore, UserRepository, UserStore};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Boxed transactional work handed to [`UnitOfWork::transaction`].
pub type TransactionFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic `transaction` method;
/// tests wrap mocked repositories in their own implementation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get task repository
    fn tasks(&self) -> Arc<dyn TaskRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Commits on `Ok`, rolls back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to an open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    task_repo: Arc<TaskStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let task_repo = Arc::new(TaskStore::new(db.clone()));
        Self {
            db,
            user_repo,
            task_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn tasks(&self) -> Arc<dyn TaskRepository> {
        self.task_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find user by exact username
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    /// Create a new user.
    ///
    /// A unique-constraint violation (a concurrent signup won the race) is
    /// reported as `DuplicateUsername`.
    pub async fn create(&self, username: String, password_hash: String) -> AppResult<User> {
        let active_model = UserActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        let model = active_model.insert(self.txn).await.map_err(map_insert_error)?;

        Ok(User::from(model))
    }
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUsername,
        _ => AppError::from(err),
    }
}
