//! Task service - Owner-scoped task use cases.
//!
//! Every operation on an existing task loads it first and compares its
//! stored `user_id` with the requester before touching it.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{validate_content, SortOrder, Task};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Task store operations.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Tasks owned by `user_id`, in creation order or by due date
    async fn list_for_user(&self, user_id: i32, sort: Option<SortOrder>) -> AppResult<Vec<Task>>;

    /// Create a task for `user_id`
    async fn create(
        &self,
        user_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task>;

    /// Read a task the requester owns
    async fn get(&self, task_id: i32, requester_id: i32) -> AppResult<Task>;

    /// Replace content and due date; `None` clears the due date
    async fn update(
        &self,
        task_id: i32,
        requester_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task>;

    /// Delete a task the requester owns
    async fn delete(&self, task_id: i32, requester_id: i32) -> AppResult<()>;

    /// Mark a task the requester owns as completed
    async fn mark_complete(&self, task_id: i32, requester_id: i32) -> AppResult<Task>;
}

/// Concrete implementation of TaskService using Unit of Work.
pub struct TaskManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TaskManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load a task and check ownership: `NotFound`, then `Forbidden`.
    async fn owned_task(&self, task_id: i32, requester_id: i32) -> AppResult<Task> {
        let task = self.uow.tasks().find_by_id(task_id).await?.ok_or_not_found()?;

        if let Err(e) = task.ensure_owner(requester_id) {
            tracing::warn!(
                task_id,
                requester_id,
                owner_id = task.user_id,
                "Rejected access to task owned by another user"
            );
            return Err(e);
        }

        Ok(task)
    }
}

#[async_trait]
impl<U: UnitOfWork> TaskService for TaskManager<U> {
    async fn list_for_user(&self, user_id: i32, sort: Option<SortOrder>) -> AppResult<Vec<Task>> {
        self.uow.tasks().list_by_owner(user_id, sort).await
    }

    async fn create(
        &self,
        user_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task> {
        validate_content(&content)?;

        let task = self.uow.tasks().create(user_id, content, due_date).await?;
        tracing::debug!(task_id = task.id, user_id, "Task created");
        Ok(task)
    }

    async fn get(&self, task_id: i32, requester_id: i32) -> AppResult<Task> {
        self.owned_task(task_id, requester_id).await
    }

    async fn update(
        &self,
        task_id: i32,
        requester_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task> {
        let mut task = self.owned_task(task_id, requester_id).await?;
        validate_content(&content)?;

        task.content = content;
        task.due_date = due_date;

        let task = self.uow.tasks().update(task).await?;
        tracing::debug!(task_id, "Task updated");
        Ok(task)
    }

    async fn delete(&self, task_id: i32, requester_id: i32) -> AppResult<()> {
        self.owned_task(task_id, requester_id).await?;
        self.uow.tasks().delete(task_id).await?;
        tracing::debug!(task_id, "Task deleted");
        Ok(())
    }

    async fn mark_complete(&self, task_id: i32, requester_id: i32) -> AppResult<Task> {
        let mut task = self.owned_task(task_id, requester_id).await?;
        if task.completed {
            return Ok(task);
        }

        task.completed = true;
        let task = self.uow.tasks().update(task).await?;
        tracing::debug!(task_id, "Task marked complete");
        Ok(task)
    }
}
