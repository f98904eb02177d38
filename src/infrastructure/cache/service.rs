//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching serialized definitions by identifier.
///
/// Implementations must be thread-safe and fail open: a broken cache degrades
/// to store lookups and never fails a request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached JSON document for `id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(json))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_definition(&self, id: &str) -> CacheResult<Option<String>>;

    /// Stores the JSON document for `id`, using the implementation's default
    /// TTL when `ttl_seconds` is `None`.
    async fn set_definition(
        &self,
        id: &str,
        document: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Stores the JSON document for `id` only if no entry exists yet.
    ///
    /// Read-through fills use this so that a document read from the store
    /// before a concurrent update cannot overwrite the updated entry.
    async fn fill_definition(
        &self,
        id: &str,
        document: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes the cached document for `id`.
    async fn invalidate(&self, id: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
