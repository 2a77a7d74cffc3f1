//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod credential_service;
mod task_service;

#[cfg(test)]
mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use credential_service::{CredentialManager, CredentialService};
pub use task_service::{TaskManager, TaskService};
