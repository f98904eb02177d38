//! Store adapter trait definitions for the domain layer.
//!
//! The dictionary core talks to persistence only through these traits.
//! Concrete stores live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Traits
//!
//! - [`DefinitionStore`] - point reads, upserts, keyset scans and offset lookups
//!
//! # Testing
//!
//! See integration tests in `tests/store_*.rs` for usage examples.

pub mod definition_store;

pub use definition_store::DefinitionStore;

#[cfg(test)]
pub use definition_store::MockDefinitionStore;
