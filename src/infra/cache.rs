//! Redis cache implementation.
//!
//! JSON values under string keys with a TTL. Backs the Redis session store.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::CACHE_PREFIX_SESSION;
use crate::errors::{AppError, AppResult};

/// Redis connection shared by all requests.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis at `url`.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        let connection = ConnectionManager::new(Client::open(url)?).await?;
        tracing::info!("Redis cache connected");
        Ok(Self { connection })
    }

    /// Read and decode a JSON value.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let raw: Option<String> = self.conn().get(key).await.map_err(cache_error)?;

        raw.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| AppError::internal(format!("Cache decode failed for {}: {}", key, e)))
        })
        .transpose()
    }

    /// Encode and store a JSON value that expires after `ttl_seconds`.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache encode failed for {}: {}", key, e)))?;

        self.conn()
            .set_ex::<_, _, ()>(key, json, ttl_seconds)
            .await
            .map_err(cache_error)
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.conn().del::<_, ()>(key).await.map_err(cache_error)
    }

    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        self.conn().exists(key).await.map_err(cache_error)
    }

    // Sessions

    pub async fn set_session<T: Serialize>(
        &self,
        session_id: &str,
        data: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        self.set_with_ttl(&session_key(session_id), data, ttl_seconds)
            .await
    }

    pub async fn get_session<T: DeserializeOwned>(&self, session_id: &str) -> AppResult<Option<T>> {
        self.get(&session_key(session_id)).await
    }

    pub async fn delete_session(&self, session_id: &str) -> AppResult<()> {
        self.delete(&session_key(session_id)).await
    }

    fn conn(&self) -> ConnectionManager {
        self.connection.clone()
    }
}

fn session_key(session_id: &str) -> String {
    format!("{}{}", CACHE_PREFIX_SESSION, session_id)
}

fn cache_error(e: RedisError) -> AppError {
    tracing::error!(error = %e, "Redis command failed");
    AppError::internal(format!("Cache error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_prefix() {
        assert_eq!(session_key("abc"), "session:abc");
    }
}
