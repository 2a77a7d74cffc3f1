//! Todo App - A multi-user to-do list web application
//!
//! Users sign up, log in, and manage a private list of tasks through
//! server-rendered HTML pages. Every task belongs to exactly one user and
//! is only ever visible to or changeable by that user.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, tasks, passwords and sessions
//! - **services**: Credential, task and session use cases
//! - **infra**: Database, migrations, repositories and session storage
//! - **api**: HTTP handlers, views, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, Session, SortOrder, Task, User};
pub use errors::{AppError, AppResult};
