//! Application layer: the dictionary repository.
//!
//! [`DictionaryRepository`] orchestrates the store adapter: it assigns
//! identifiers, validates input, pages through listings, picks random entries
//! and applies the update policy. HTTP handlers and the admin CLI call into it
//! and never touch a store directly.

pub mod dictionary_repository;

pub use dictionary_repository::{DEFAULT_PAGE_SIZE, DictionaryRepository, MAX_PAGE_SIZE};
