//! Definition entity: a single glossary entry with its embedded author.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Contributor credited for a definition. Not independently addressable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub link: Option<String>,
}

/// A persisted glossary entry.
///
/// `id` is assigned once by [`crate::application::DictionaryRepository`] and
/// never changes. `word` is not a uniqueness key: several entries may define
/// the same term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub id: String,
    pub word: String,
    pub content: String,
    pub abbreviation: Option<String>,
    pub tag: Option<String>,
    pub learn_more_url: Option<String>,
    pub author: Author,
}

impl Definition {
    /// Builds a definition from validated input under the given identifier.
    pub fn from_input(id: String, input: DefinitionInput) -> Self {
        let input = input.normalized();
        Self {
            id,
            word: input.word,
            content: input.content,
            abbreviation: input.abbreviation,
            tag: input.tag,
            learn_more_url: input.learn_more_url,
            author: Author {
                name: input.author_name.unwrap_or_default(),
                link: input.author_link,
            },
        }
    }

    /// Returns true if `id`, `word` and `content` are all non-blank.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.word.trim().is_empty()
            && !self.content.trim().is_empty()
    }

    /// Applies caller-supplied fields to this entry, keeping its identity.
    ///
    /// With [`UpdatePolicy::Replace`] every mutable field takes the input
    /// value, so an absent optional field clears the stored one. With
    /// [`UpdatePolicy::Merge`] blank or absent input fields keep the stored
    /// value.
    pub fn apply(&mut self, input: DefinitionInput, policy: UpdatePolicy) {
        let input = input.normalized();

        match policy {
            UpdatePolicy::Replace => {
                self.word = input.word;
                self.content = input.content;
                self.abbreviation = input.abbreviation;
                self.tag = input.tag;
                self.learn_more_url = input.learn_more_url;
                self.author.name = input.author_name.unwrap_or_default();
                self.author.link = input.author_link;
            }
            UpdatePolicy::Merge => {
                if !input.word.is_empty() {
                    self.word = input.word;
                }
                if !input.content.is_empty() {
                    self.content = input.content;
                }
                merge_field(&mut self.abbreviation, input.abbreviation);
                merge_field(&mut self.tag, input.tag);
                merge_field(&mut self.learn_more_url, input.learn_more_url);
                if let Some(name) = input.author_name {
                    self.author.name = name;
                }
                merge_field(&mut self.author.link, input.author_link);
            }
        }
    }
}

fn merge_field(current: &mut Option<String>, incoming: Option<String>) {
    if incoming.is_some() {
        *current = incoming;
    }
}

/// How [`Definition::apply`] treats fields the caller left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdatePolicy {
    /// Whole-record replacement: omitted fields are erased.
    #[default]
    Replace,
    /// Partial merge: omitted fields keep their stored value.
    Merge,
}

impl std::str::FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "merge" => Ok(Self::Merge),
            other => Err(format!("unknown update policy '{other}'")),
        }
    }
}

/// Typed input for creating or updating a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionInput {
    pub word: String,
    pub content: String,
    pub author_name: Option<String>,
    pub author_link: Option<String>,
    pub learn_more_url: Option<String>,
    pub tag: Option<String>,
    pub abbreviation: Option<String>,
}

impl DefinitionInput {
    pub fn new(word: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Checks that `word` and `content` are non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] listing every missing field.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut missing = Vec::new();
        if self.word.trim().is_empty() {
            missing.push("word");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::bad_request(
                "Word and content are required",
                json!({ "fields": missing }),
            ))
        }
    }

    /// Trims every field and turns blank optional fields into `None`.
    fn normalized(self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            content: self.content.trim().to_string(),
            author_name: non_blank(self.author_name),
            author_link: non_blank(self.author_link),
            learn_more_url: non_blank(self.learn_more_url),
            tag: non_blank(self.tag),
            abbreviation: non_blank(self.abbreviation),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> DefinitionInput {
        DefinitionInput {
            word: "  latency ".to_string(),
            content: "Time between request and response.".to_string(),
            author_name: Some("Ada".to_string()),
            author_link: Some("https://example.com/ada".to_string()),
            learn_more_url: Some("https://example.com/latency".to_string()),
            tag: Some("networking".to_string()),
            abbreviation: Some("lat".to_string()),
        }
    }

    #[test]
    fn test_from_input_trims_and_embeds_author() {
        let def = Definition::from_input("id-1".to_string(), full_input());

        assert_eq!(def.id, "id-1");
        assert_eq!(def.word, "latency");
        assert_eq!(def.author.name, "Ada");
        assert_eq!(def.author.link.as_deref(), Some("https://example.com/ada"));
        assert_eq!(def.tag.as_deref(), Some("networking"));
        assert!(def.is_well_formed());
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let mut input = DefinitionInput::new("word", "content");
        input.tag = Some("   ".to_string());
        input.author_name = Some(String::new());

        let def = Definition::from_input("id-2".to_string(), input);
        assert!(def.tag.is_none());
        assert_eq!(def.author.name, "");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        assert!(DefinitionInput::new("foo", "bar").validate().is_ok());

        let err = DefinitionInput::new(" ", "").validate().unwrap_err();
        match err {
            AppError::Validation { details, .. } => {
                assert_eq!(details["fields"], json!(["word", "content"]));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_replace_erases_omitted_fields() {
        let mut def = Definition::from_input("id-3".to_string(), full_input());

        def.apply(DefinitionInput::new("foo2", "bar2"), UpdatePolicy::Replace);

        assert_eq!(def.id, "id-3");
        assert_eq!(def.word, "foo2");
        assert_eq!(def.content, "bar2");
        assert!(def.tag.is_none());
        assert!(def.abbreviation.is_none());
        assert!(def.learn_more_url.is_none());
        assert_eq!(def.author, Author::default());
    }

    #[test]
    fn test_apply_merge_keeps_omitted_fields() {
        let mut def = Definition::from_input("id-4".to_string(), full_input());

        let mut input = DefinitionInput::new("", "Updated body.");
        input.tag = Some("systems".to_string());
        def.apply(input, UpdatePolicy::Merge);

        assert_eq!(def.word, "latency");
        assert_eq!(def.content, "Updated body.");
        assert_eq!(def.tag.as_deref(), Some("systems"));
        assert_eq!(def.abbreviation.as_deref(), Some("lat"));
        assert_eq!(def.author.name, "Ada");
    }

    #[test]
    fn test_update_policy_from_str() {
        assert_eq!("replace".parse::<UpdatePolicy>(), Ok(UpdatePolicy::Replace));
        assert_eq!("MERGE".parse::<UpdatePolicy>(), Ok(UpdatePolicy::Merge));
        assert!("patch".parse::<UpdatePolicy>().is_err());
    }

    #[test]
    fn test_definition_serializes_with_nested_author() {
        let def = Definition::from_input("id-5".to_string(), full_input());
        let value = serde_json::to_value(&def).unwrap();

        assert_eq!(value["id"], "id-5");
        assert_eq!(value["author"]["name"], "Ada");
        assert_eq!(value["learn_more_url"], "https://example.com/latency");
    }
}
