//! User domain entity.

use serde::Serialize;

use crate::config::MAX_USERNAME_LENGTH;
use crate::errors::{AppError, AppResult};

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(id: i32, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }
}

/// Trim and check a username submitted at signup.
pub fn normalize_username(raw: &str) -> AppResult<String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(AppError::invalid_input(
            "Both username and password are required.",
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Username must be at most {} characters.",
            MAX_USERNAME_LENGTH
        )));
    }
    Ok(username.to_string())
}
