//! In-memory definition store.

use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::Definition;
use crate::domain::pagination::{DefinitionFilter, Page, PageToken};
use crate::domain::repositories::DefinitionStore;
use crate::error::AppError;

/// Process-local store backed by an ordered map.
///
/// Used for tests and for running the service without a database
/// (`STORE_BACKEND=memory`). Entries are kept sorted by `id`, which gives
/// scans and `fetch_at` the same stable order as the PostgreSQL store.
/// Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryDefinitionStore {
    entries: RwLock<BTreeMap<String, Definition>>,
    simulate_failure: AtomicBool,
}

impl InMemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`AppError::Store`].
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(AppError::store(
                "Store unavailable",
                json!({ "backend": "memory" }),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DefinitionStore for InMemoryDefinitionStore {
    async fn get(&self, id: &str) -> Result<Option<Definition>, AppError> {
        self.check_available()?;
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn put(&self, definition: &Definition) -> Result<(), AppError> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(definition.id.clone(), definition.clone());
        Ok(())
    }

    async fn scan(
        &self,
        filter: &DefinitionFilter,
        page_token: Option<PageToken>,
        page_size: usize,
    ) -> Result<Page<Definition>, AppError> {
        self.check_available()?;

        let after = page_token.map(|t| t.resume_after()).transpose()?;
        let lower = match &after {
            Some(id) => Bound::Excluded(id.as_str()),
            None => Bound::Unbounded,
        };

        let entries = self.entries.read().await;
        let mut matching = entries
            .range::<str, _>((lower, Bound::Unbounded))
            .map(|(_, definition)| definition)
            .filter(|definition| match &filter.tag {
                Some(tag) => definition.tag.as_deref() == Some(tag.as_str()),
                None => true,
            });

        let items: Vec<Definition> = matching.by_ref().take(page_size).cloned().collect();
        let next_page_token = if matching.next().is_some() {
            items.last().map(|d| PageToken::after(&d.id))
        } else {
            None
        };

        Ok(Page::new(items, next_page_token))
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.check_available()?;
        Ok(self.entries.read().await.len() as u64)
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<Definition>, AppError> {
        self.check_available()?;

        let Ok(offset) = usize::try_from(offset) else {
            return Ok(None);
        };
        Ok(self.entries.read().await.values().nth(offset).cloned())
    }
}
