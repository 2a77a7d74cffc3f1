//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::handlers::{auth_routes, session_routes, task_routes};
use super::middleware::auth_middleware;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Public authentication pages
        .merge(auth_routes())
        // Everything else requires a session
        .merge(
            task_routes()
                .merge(session_routes())
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
    sessions: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => ServiceStatus {
                status: "healthy",
                error: None,
            },
            Err(e) => ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Health check endpoint with database and session store connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = ServiceStatus::from_result(state.database.ping().await);
    let session_status = ServiceStatus::from_result(state.sessions.ping().await);

    let all_healthy = db_status.is_healthy() && session_status.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
            sessions: session_status,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
