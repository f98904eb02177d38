//! Opaque page tokens, page results and listing filters.
//!
//! Listing is keyset-paginated in ascending `id` order. A [`PageToken`] wraps
//! the URL-safe base64 encoding of a small JSON cursor naming the last `id`
//! returned, so callers can pass it through query strings and headers without
//! escaping. Tokens carry no meaning for callers; only stores decode them.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Continuation cursor returned by one page fetch and consumed by the next.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

#[derive(Serialize, Deserialize)]
struct Cursor {
    after: String,
}

impl PageToken {
    /// Wraps a raw token received from a caller. Not validated until decoded.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Builds a token that resumes a scan after `id`.
    pub fn after(id: &str) -> Self {
        let cursor = Cursor {
            after: id.to_string(),
        };
        // Serializing a struct with a single string field cannot fail.
        let bytes = serde_json::to_vec(&cursor).unwrap_or_default();
        Self(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Decodes the `id` this token resumes after.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the token was not produced by
    /// [`PageToken::after`].
    pub fn resume_after(&self) -> Result<String, AppError> {
        let invalid = || AppError::bad_request("Invalid page token", json!({ "token": self.0 }));

        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|_| invalid())?;
        let cursor: Cursor = serde_json::from_slice(&bytes).map_err(|_| invalid())?;

        Ok(cursor.after)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results plus the token for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<PageToken>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<PageToken>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    /// Transforms the items of the page, keeping the continuation token.
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Page<U> {
        Page {
            items: f(self.items),
            next_page_token: self.next_page_token,
        }
    }
}

/// Optional restriction applied to listing scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionFilter {
    /// Exact match on the definition's tag.
    pub tag: Option<String>,
}

impl DefinitionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to `tag`, trimmed the same way stored tags are.
    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }
}
