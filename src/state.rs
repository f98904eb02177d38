//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::DictionaryRepository;
use crate::domain::entities::UpdatePolicy;
use crate::domain::repositories::DefinitionStore;
use crate::infrastructure::cache::CacheService;

/// Dictionary repository over a store chosen at startup.
pub type SharedDictionary = Arc<DictionaryRepository<dyn DefinitionStore>>;

#[derive(Clone)]
pub struct AppState {
    pub dictionary: SharedDictionary,
    pub cache: Arc<dyn CacheService>,
    /// Update mode used when a `PUT` request does not name one.
    pub default_update_policy: UpdatePolicy,
}

impl AppState {
    pub fn new(
        dictionary: SharedDictionary,
        cache: Arc<dyn CacheService>,
        default_update_policy: UpdatePolicy,
    ) -> Self {
        Self {
            dictionary,
            cache,
            default_update_policy,
        }
    }
}
