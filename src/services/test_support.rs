//! Unit of Work over mocked repositories for service tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    MockTaskRepository, MockUserRepository, TaskRepository, TransactionContext,
    TransactionFuture, UnitOfWork, UserRepository,
};

pub(crate) struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    task_repo: Arc<MockTaskRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn new(users: MockUserRepository, tasks: MockTaskRepository) -> Self {
        Self {
            user_repo: Arc::new(users),
            task_repo: Arc::new(tasks),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn tasks(&self) -> Arc<dyn TaskRepository> {
        self.task_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TransactionFuture<'a, T> + Send,
        T: Send,
    {
        // Transactions need a real connection; covered by the SQLite tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
