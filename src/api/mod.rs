//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers and HTML views
//! - Session middleware and cookies
//! - Custom extractors
//! - Route definitions

pub mod cookies;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::AppState;
