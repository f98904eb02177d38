//! Domain layer containing the glossary data model and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - `Definition`, `Author` and typed inputs
//! - [`pagination`] - Opaque page tokens, pages and listing filters
//! - [`repositories`] - Store adapter trait implemented by the infrastructure layer
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Store traits define contracts implemented by the infrastructure layer
//! - Dictionary logic lives in [`crate::application::DictionaryRepository`]

pub mod entities;
pub mod pagination;
pub mod repositories;
