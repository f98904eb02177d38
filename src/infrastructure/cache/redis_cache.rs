//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

/// Redis cache for definition point lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnects.
/// All operations are fail-open: errors are logged but don't propagate to callers.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "definition:".to_string(),
        })
    }

    fn build_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_definition(&self, id: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(document)) => {
                debug!(id, "Cache HIT");
                Ok(Some(document))
            }
            Ok(None) => {
                debug!(id, "Cache MISS");
                Ok(None)
            }
            Err(e) => {
                error!(id, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_definition(
        &self,
        id: &str,
        document: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn.set_ex::<_, _, ()>(&key, document, ttl).await {
            warn!(id, error = %e, "Redis SET failed");
        } else {
            debug!(id, ttl, "Cache SET");
        }
        Ok(())
    }

    async fn fill_definition(
        &self,
        id: &str,
        document: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        // SET NX replies nil when the key already exists.
        let reply: Result<Option<String>, _> = redis::cmd("SET")
            .arg(&key)
            .arg(document)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await;

        match reply {
            Ok(Some(_)) => debug!(id, ttl, "Cache FILL"),
            Ok(None) => debug!(id, "Cache FILL skipped, newer entry present"),
            Err(e) => warn!(id, error = %e, "Redis SET NX failed"),
        }
        Ok(())
    }

    async fn invalidate(&self, id: &str) -> CacheResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!(id, "Cache INVALIDATE");
                }
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "Redis DEL failed");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
