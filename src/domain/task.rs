//! Task domain entity and related types.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DUE_DATE_FORMAT, MAX_CONTENT_LENGTH};
use crate::errors::{AppError, AppResult};

/// A to-do item owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i32,
    pub content: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub user_id: i32,
}

impl Task {
    /// Ownership is decided by the stored foreign key alone.
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Fail with `Forbidden` unless `user_id` owns this task.
    pub fn ensure_owner(&self, user_id: i32) -> AppResult<()> {
        if self.is_owned_by(user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Due-date ordering for task lists.
///
/// Tasks without a due date sort last when ascending and first when
/// descending; ties break by id in the same direction, so the two orders are
/// exact reverses of each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `"asc"` sorts ascending; any other value sorts descending.
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Check task content before it reaches the store.
pub fn validate_content(content: &str) -> AppResult<()> {
    if content.trim().is_empty() {
        return Err(AppError::invalid_input("Todo cannot be empty."));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Todo must be at most {} characters.",
            MAX_CONTENT_LENGTH
        )));
    }
    Ok(())
}

/// Parse the `due_date` form field. Missing or blank means no due date.
pub fn parse_due_date(raw: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| AppError::invalid_input("Due date must be formatted as YYYY-MM-DD.")),
    }
}
