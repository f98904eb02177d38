//! Definition-level helpers over a [`CacheService`].
//!
//! Writers put the updated entry with [`refresh`], which overwrites. Readers
//! fill a miss with [`fill`], which never overwrites. A reader holding a
//! document from before an update therefore cannot replace the updated one.

use tracing::{debug, warn};

use super::service::CacheService;
use crate::domain::entities::Definition;

/// Returns the cached definition for `id`, dropping unreadable entries.
pub async fn cached(cache: &dyn CacheService, id: &str) -> Option<Definition> {
    let document = cache.get_definition(id).await.ok().flatten()?;

    match serde_json::from_str::<Definition>(&document) {
        Ok(definition) => Some(definition),
        Err(e) => {
            warn!(id, error = %e, "Discarding unreadable cache entry");
            let _ = cache.invalidate(id).await;
            None
        }
    }
}

/// Caches a definition read from the store unless an entry already exists.
pub async fn fill(cache: &dyn CacheService, definition: &Definition) {
    let Some(document) = encode(definition) else {
        return;
    };
    if let Err(e) = cache.fill_definition(&definition.id, &document, None).await {
        warn!(error = ?e, id = %definition.id, "Failed to cache definition");
    }
}

/// Replaces the cached entry with a freshly written definition.
///
/// Falls back to invalidation when the write fails, so the stale entry
/// does not outlive the update.
pub async fn refresh(cache: &dyn CacheService, definition: &Definition) {
    let id = definition.id.as_str();
    let written = match encode(definition) {
        Some(document) => cache.set_definition(id, &document, None).await.is_ok(),
        None => false,
    };

    if !written && let Err(e) = cache.invalidate(id).await {
        warn!(error = ?e, id, "Failed to invalidate cache after update");
    }
}

fn encode(definition: &Definition) -> Option<String> {
    serde_json::to_string(definition)
        .inspect_err(|e| debug!(id = %definition.id, error = %e, "Definition not cached"))
        .ok()
}
