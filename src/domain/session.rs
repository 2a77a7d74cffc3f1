//! Session domain entity - proof of a successful login.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-tracked login, scoped to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random identifier carried by the session cookie
    pub id: String,
    pub user_id: i32,
    pub username: String,
}

impl Session {
    /// Start a new session with a fresh random id.
    pub fn new(user_id: i32, username: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            username,
        }
    }
}
