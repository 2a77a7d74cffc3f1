//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database, MemorySessionStore, RedisSessionStore, SessionStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // Initialize database
    let db = Arc::new(Database::connect(&config).await?);

    let sessions = session_store(&config).await?;

    let app_state = AppState::from_config(db, sessions, &config)?;

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Redis-backed sessions when REDIS_URL is set, process-local otherwise.
async fn session_store(config: &Config) -> AppResult<Arc<dyn SessionStore>> {
    match &config.redis_url {
        Some(url) => {
            let cache = Cache::connect(url)
                .await
                .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?;
            Ok(Arc::new(RedisSessionStore::new(cache)))
        }
        None => {
            tracing::warn!("REDIS_URL not set, sessions are kept in memory");
            Ok(Arc::new(MemorySessionStore::new()))
        }
    }
}
