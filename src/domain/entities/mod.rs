//! Core domain entities representing the glossary data model.
//!
//! # Entity Types
//!
//! - [`Definition`] - A glossary entry, the only persisted entity
//! - [`Author`] - Contributor embedded in a definition
//!
//! Creation and update go through [`DefinitionInput`], a fully typed input
//! struct validated before anything reaches a store. [`UpdatePolicy`] selects
//! between whole-record replacement and partial merge on update.

pub mod definition;

pub use definition::{Author, Definition, DefinitionInput, UpdatePolicy};
