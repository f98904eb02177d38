//! Store adapter trait for definition persistence.

use async_trait::async_trait;

use crate::domain::entities::Definition;
use crate::domain::pagination::{DefinitionFilter, Page, PageToken};
use crate::error::AppError;

/// Narrow interface over a document store holding [`Definition`]s keyed by `id`.
///
/// All listing operations share one stable order (ascending `id`), which is
/// also the order [`DefinitionStore::fetch_at`] indexes into.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDefinitionStore`] - PostgreSQL JSONB documents
/// - [`crate::infrastructure::persistence::InMemoryDefinitionStore`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Point lookup by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backend failure.
    async fn get(&self, id: &str) -> Result<Option<Definition>, AppError>;

    /// Inserts or replaces the document with the same `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backend failure.
    async fn put(&self, definition: &Definition) -> Result<(), AppError>;

    /// Returns up to `page_size` entries matching `filter`, resuming after
    /// `page_token` when given.
    ///
    /// The returned page carries a next token only if more matching entries
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed token and
    /// [`AppError::Store`] on backend failure.
    async fn scan(
        &self,
        filter: &DefinitionFilter,
        page_token: Option<PageToken>,
        page_size: usize,
    ) -> Result<Page<Definition>, AppError>;

    /// Total number of persisted entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backend failure.
    async fn count(&self) -> Result<u64, AppError>;

    /// Returns the entry at zero-based position `offset` in scan order, or
    /// `None` if the collection holds `offset` entries or fewer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backend failure.
    async fn fetch_at(&self, offset: u64) -> Result<Option<Definition>, AppError>;
}
