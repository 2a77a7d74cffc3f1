//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Sessions & Cookies
// =============================================================================

/// Name of the cookie carrying the session identifier
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Name of the cookie carrying a one-shot status message
pub const FLASH_COOKIE_NAME: &str = "flash";

/// Default session lifetime in seconds (24 hours)
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 86_400;

/// Cache key prefix for session data
pub const CACHE_PREFIX_SESSION: &str = "session:";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default Postgres host (for development)
pub const DEFAULT_POSTGRES_HOST: &str = "localhost";

/// Default Postgres port
pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Default Postgres user (for development)
pub const DEFAULT_POSTGRES_USERNAME: &str = "postgres";

/// Default Postgres password (for development)
pub const DEFAULT_POSTGRES_PASSWORD: &str = "password";

/// Default Postgres database name
pub const DEFAULT_POSTGRES_DATABASE: &str = "todo_app";

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length (matches the users.username column)
pub const MAX_USERNAME_LENGTH: usize = 80;

/// Maximum task content length (matches the tasks.content column)
pub const MAX_CONTENT_LENGTH: usize = 200;

/// Accepted format of the `due_date` form field
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Routes
// =============================================================================

/// Landing page for authenticated users
pub const ROUTE_INDEX: &str = "/";

/// Login page, target of every unauthenticated redirect
pub const ROUTE_LOGIN: &str = "/login";

/// Signup page
pub const ROUTE_SIGNUP: &str = "/signup";
