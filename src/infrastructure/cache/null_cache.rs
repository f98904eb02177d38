//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when Redis is not configured, when the Redis connection fails at
/// startup, and in tests. Every lookup is a miss.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_definition(&self, _id: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_definition(
        &self,
        _id: &str,
        _document: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn fill_definition(
        &self,
        _id: &str,
        _document: &str,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _id: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        cache.set_definition("id", "{}", None).await.unwrap();
        cache.fill_definition("id", "{}", None).await.unwrap();

        assert!(cache.get_definition("id").await.unwrap().is_none());
        assert!(cache.invalidate("id").await.is_ok());
        assert!(cache.health_check().await);
    }
}
