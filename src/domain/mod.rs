//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod session;
pub mod task;
pub mod user;

pub use password::Password;
pub use session::Session;
pub use task::{parse_due_date, validate_content, SortOrder, Task};
pub use user::{normalize_username, User};
