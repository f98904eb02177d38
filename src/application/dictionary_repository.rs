//! Dictionary repository: the glossary's data-access core.
//!
//! Owns identifier assignment, input validation, pagination, random selection
//! and the update policy. Durable state lives entirely in the injected
//! [`DefinitionStore`]; the repository holds no mutable state of its own and
//! every operation may run concurrently with any other.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::{Definition, DefinitionInput, UpdatePolicy};
use crate::domain::pagination::{DefinitionFilter, Page, PageToken};
use crate::domain::repositories::DefinitionStore;
use crate::error::AppError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest page a single scan may request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Upper bound on count-then-resolve rounds in [`DictionaryRepository::get_random_definition`].
const MAX_DRAW_ATTEMPTS: usize = 3;

/// Glossary operations over a [`DefinitionStore`].
///
/// `S` may be a concrete store or `dyn DefinitionStore` when the backend is
/// chosen at runtime.
pub struct DictionaryRepository<S: DefinitionStore + ?Sized> {
    store: Arc<S>,
    page_size: usize,
}

impl<S: DefinitionStore + ?Sized> DictionaryRepository<S> {
    /// Creates a repository with [`DEFAULT_PAGE_SIZE`].
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size used by listing operations, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Lists one page of definitions.
    ///
    /// Passing `None` as `page_token` starts from the beginning. Following
    /// the returned tokens until none remains visits every entry of a
    /// quiescent collection exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed token and
    /// [`AppError::Store`] on backend failure.
    pub async fn get_definitions(
        &self,
        filter: &DefinitionFilter,
        page_token: Option<PageToken>,
    ) -> Result<Page<Definition>, AppError> {
        let result = self.store.scan(filter, page_token, self.page_size).await;
        record("get_definitions", &result);

        let page = result?;
        debug!(
            items = page.items.len(),
            has_more = page.next_page_token.is_some(),
            "Listed definitions"
        );
        Ok(page)
    }

    /// Lists the distinct words of one page of definitions.
    ///
    /// Deduplication is scoped to the page: a word whose entries span several
    /// pages appears once per page it occurs on. Callers needing a globally
    /// distinct set must aggregate across pages themselves.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_definitions`].
    pub async fn get_words(
        &self,
        filter: &DefinitionFilter,
        page_token: Option<PageToken>,
    ) -> Result<Page<String>, AppError> {
        let result = self.store.scan(filter, page_token, self.page_size).await;
        record("get_words", &result);

        Ok(result?.map_items(distinct_words))
    }

    /// Picks one definition uniformly at random.
    ///
    /// Reads the current `count()`, draws an index in `[0, count)` and
    /// resolves it with a single `fetch_at`. The two steps are not atomic: if
    /// the collection changes in between, selection is only approximately
    /// uniform, and a draw that falls past the end is repeated (up to three
    /// rounds). On a quiescent collection every entry has probability `1/N`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmptyCollection`] if there is nothing to pick and
    /// [`AppError::Store`] on backend failure.
    pub async fn get_random_definition(&self) -> Result<Definition, AppError> {
        let result = self.draw_random().await;
        record("get_random_definition", &result);
        result
    }

    async fn draw_random(&self) -> Result<Definition, AppError> {
        for attempt in 1..=MAX_DRAW_ATTEMPTS {
            let total = self.store.count().await?;
            if total == 0 {
                return Err(AppError::EmptyCollection);
            }

            let index = rand::rng().random_range(0..total);

            if let Some(definition) = self.store.fetch_at(index).await? {
                debug!(index, total, id = %definition.id, "Picked random definition");
                return Ok(definition);
            }

            warn!(attempt, index, total, "Random index fell past the end of the collection");
        }

        Err(AppError::EmptyCollection)
    }

    /// Fetches a definition by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entry has this `id` and
    /// [`AppError::Store`] on backend failure.
    pub async fn get_definition(&self, id: &str) -> Result<Definition, AppError> {
        let result = self.find(id).await;
        record("get_definition", &result);
        result
    }

    async fn find(&self, id: &str) -> Result<Definition, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Definition not found", json!({ "id": id })))
    }

    /// Validates `input`, assigns a fresh identifier and persists the entry.
    ///
    /// Returns the stored definition, including its new `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `word` or `content` is blank, in
    /// which case the store is not touched. Returns [`AppError::Store`] on
    /// backend failure.
    pub async fn add_definition(&self, input: DefinitionInput) -> Result<Definition, AppError> {
        let result = self.insert(input).await;
        record("add_definition", &result);
        result
    }

    async fn insert(&self, input: DefinitionInput) -> Result<Definition, AppError> {
        input.validate()?;

        let definition = Definition::from_input(Uuid::new_v4().to_string(), input);
        self.store.put(&definition).await?;

        info!(id = %definition.id, word = %definition.word, "Definition created");
        Ok(definition)
    }

    /// Updates the mutable fields of an existing definition.
    ///
    /// With [`UpdatePolicy::Replace`] every mutable field is overwritten and
    /// omitted optional fields are erased. With [`UpdatePolicy::Merge`]
    /// omitted fields keep their stored values. The identifier never changes
    /// and a missing entry is never created. Concurrent updates of the same
    /// `id` are last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `id` does not exist (checked first),
    /// [`AppError::Validation`] if the resulting entry would have a blank
    /// `word` or `content`, and [`AppError::Store`] on backend failure.
    pub async fn update_definition(
        &self,
        id: &str,
        input: DefinitionInput,
        policy: UpdatePolicy,
    ) -> Result<Definition, AppError> {
        let result = self.replace(id, input, policy).await;
        record("update_definition", &result);
        result
    }

    async fn replace(
        &self,
        id: &str,
        input: DefinitionInput,
        policy: UpdatePolicy,
    ) -> Result<Definition, AppError> {
        let mut definition = self.find(id).await?;

        definition.apply(input, policy);
        if !definition.is_well_formed() {
            return Err(AppError::bad_request(
                "Word and content are required",
                json!({ "id": id, "policy": policy }),
            ));
        }

        self.store.put(&definition).await?;

        info!(id = %definition.id, ?policy, "Definition updated");
        Ok(definition)
    }

    /// Total number of stored definitions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on backend failure.
    pub async fn count(&self) -> Result<u64, AppError> {
        self.store.count().await
    }
}

/// Distinct words in first-seen order.
fn distinct_words(definitions: Vec<Definition>) -> Vec<String> {
    let mut seen = HashSet::new();
    definitions
        .into_iter()
        .map(|d| d.word)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

fn record<T>(operation: &'static str, result: &Result<T, AppError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.code(),
    };
    metrics::counter!(
        "dictionary_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
