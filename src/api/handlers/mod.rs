//! HTTP request handlers.

pub mod auth_handler;
pub mod task_handler;

pub use auth_handler::{auth_routes, session_routes};
pub use task_handler::task_routes;
