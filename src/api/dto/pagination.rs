//! Listing query parameters and continuation headers.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::pagination::{DefinitionFilter, PageToken};

/// Response header carrying the token for the next page.
pub const CONTINUATION_HEADER: HeaderName = HeaderName::from_static("x-continuation-token");

/// Query parameters shared by `GET /api/definitions` and `GET /api/words`.
///
/// - `tag` (optional): only entries with exactly this tag
/// - `continuation` (optional): token from a previous page's
///   `x-continuation-token` header
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub tag: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub continuation: Option<String>,
}

impl ListQueryParams {
    pub fn filter(&self) -> DefinitionFilter {
        DefinitionFilter::new().with_tag(self.tag.clone())
    }

    pub fn page_token(&self) -> Option<PageToken> {
        self.continuation.as_deref().map(PageToken::new)
    }
}

/// Builds response headers advertising the next page, if any.
pub fn continuation_headers(next: Option<&PageToken>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(token) = next
        && let Ok(value) = HeaderValue::from_str(token.as_str())
    {
        headers.insert(CONTINUATION_HEADER, value);
    }
    headers
}
