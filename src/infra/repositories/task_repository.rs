//! Task repository implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    sea_query::NullOrdering, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    Order, QueryFilter, QueryOrder, Set,
};

use super::entities::task::{self, ActiveModel, Entity as TaskEntity};
use crate::domain::{SortOrder, Task};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Task persistence. Performs no ownership checks; callers filter by owner.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID regardless of owner
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Task>>;

    /// List tasks owned by `user_id`, by id or by due date
    async fn list_by_owner(&self, user_id: i32, sort: Option<SortOrder>) -> AppResult<Vec<Task>>;

    /// Insert a new, not yet completed task
    async fn create(
        &self,
        user_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task>;

    /// Persist content, due date and completion flag of an existing task
    async fn update(&self, task: Task) -> AppResult<Task>;

    /// Delete task by ID
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of TaskRepository
pub struct TaskStore {
    db: DatabaseConnection,
}

impl TaskStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Task>> {
        let result = TaskEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Task::from))
    }

    async fn list_by_owner(&self, user_id: i32, sort: Option<SortOrder>) -> AppResult<Vec<Task>> {
        let query = TaskEntity::find().filter(task::Column::UserId.eq(user_id));

        // Missing due dates go last ascending and first descending
        let query = match sort {
            None => query.order_by_asc(task::Column::Id),
            Some(SortOrder::Asc) => query
                .order_by_with_nulls(task::Column::DueDate, Order::Asc, NullOrdering::Last)
                .order_by_asc(task::Column::Id),
            Some(SortOrder::Desc) => query
                .order_by_with_nulls(task::Column::DueDate, Order::Desc, NullOrdering::First)
                .order_by_desc(task::Column::Id),
        };

        let models = query.all(&self.db).await.map_err(AppError::from)?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn create(
        &self,
        user_id: i32,
        content: String,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Task> {
        let active_model = ActiveModel {
            content: Set(content),
            due_date: Set(due_date),
            completed: Set(false),
            user_id: Set(user_id),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Task::from(model))
    }

    async fn update(&self, task: Task) -> AppResult<Task> {
        let existing = TaskEntity::find_by_id(task.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.content = Set(task.content);
        active.due_date = Set(task.due_date);
        active.completed = Set(task.completed);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Task::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = TaskEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
