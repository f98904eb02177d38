//! DTOs for definition create and update endpoints.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::{DefinitionInput, UpdatePolicy};

/// Request body for `POST /api/definitions` and `PUT /api/definitions/{id}`.
///
/// `word` and `content` default to empty strings when absent so that the
/// repository reports them as missing. Empty optional strings are treated as
/// absent.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DefinitionRequest {
    #[serde(default)]
    pub word: String,

    #[serde(default)]
    pub content: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub learn_more_url: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 64))]
    pub tag: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 32))]
    pub abbreviation: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub author_name: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub author_link: Option<String>,
}

impl From<DefinitionRequest> for DefinitionInput {
    fn from(req: DefinitionRequest) -> Self {
        Self {
            word: req.word,
            content: req.content,
            author_name: req.author_name,
            author_link: req.author_link,
            learn_more_url: req.learn_more_url,
            tag: req.tag,
            abbreviation: req.abbreviation,
        }
    }
}

/// Query parameters for `PUT /api/definitions/{id}`.
///
/// `mode=replace` erases omitted fields, `mode=merge` keeps them. Without a
/// mode the server's configured default applies.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQueryParams {
    pub mode: Option<UpdatePolicy>,
}
