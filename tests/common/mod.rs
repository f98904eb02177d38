#![allow(dead_code)]

use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use cloud_dictionary::application::DictionaryRepository;
use cloud_dictionary::domain::entities::{Definition, DefinitionInput, UpdatePolicy};
use cloud_dictionary::domain::repositories::DefinitionStore;
use cloud_dictionary::infrastructure::cache::{CacheResult, CacheService, NullCache};
use cloud_dictionary::infrastructure::persistence::InMemoryDefinitionStore;
use cloud_dictionary::routes::app_router;
use cloud_dictionary::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn create_test_state_with(
    page_size: usize,
    update_policy: UpdatePolicy,
) -> (AppState, Arc<InMemoryDefinitionStore>) {
    let store = Arc::new(InMemoryDefinitionStore::new());
    let dyn_store: Arc<dyn DefinitionStore> = store.clone();

    let dictionary = Arc::new(DictionaryRepository::new(dyn_store).with_page_size(page_size));
    let state = AppState::new(dictionary, Arc::new(NullCache), update_policy);

    (state, store)
}

pub fn create_test_state() -> (AppState, Arc<InMemoryDefinitionStore>) {
    create_test_state_with(100, UpdatePolicy::Replace)
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service(app_router(state));
    TestServer::new(app).unwrap()
}

pub async fn seed_definition(state: &AppState, word: &str, tag: Option<&str>) -> Definition {
    let mut input = DefinitionInput::new(word, format!("Meaning of {word}"));
    input.tag = tag.map(str::to_string);
    state.dictionary.add_definition(input).await.unwrap()
}

/// Map-backed cache with the same overwrite rules as Redis.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn document(&self, id: &str) -> Option<String> {
        self.entries.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_definition(&self, id: &str) -> CacheResult<Option<String>> {
        Ok(self.document(id))
    }

    async fn set_definition(&self, id: &str, document: &str, _ttl: Option<u64>) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(id.to_string(), document.to_string());
        Ok(())
    }

    async fn fill_definition(
        &self,
        id: &str,
        document: &str,
        _ttl: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_insert_with(|| document.to_string());
        Ok(())
    }

    async fn invalidate(&self, id: &str) -> CacheResult<()> {
        self.entries.lock().unwrap().remove(id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub fn create_cached_state(
    store: Arc<dyn DefinitionStore>,
) -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::default());
    let dictionary = Arc::new(DictionaryRepository::new(store));
    let state = AppState::new(dictionary, cache.clone(), UpdatePolicy::Replace);

    (state, cache)
}
