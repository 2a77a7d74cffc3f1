//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Session storage (Redis or in-process)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod session_store;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{TaskRepository, TaskStore, UserRepository, UserStore};
pub use session_store::{MemorySessionStore, RedisSessionStore, SessionStore};
pub use unit_of_work::{
    Persistence, TransactionContext, TransactionFuture, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockTaskRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use session_store::MockSessionStore;
