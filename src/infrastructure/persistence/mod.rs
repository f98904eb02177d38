//! Definition store implementations.
//!
//! # Stores
//!
//! - [`PgDefinitionStore`] - PostgreSQL, one JSONB document per definition
//! - [`InMemoryDefinitionStore`] - ordered in-process map for tests and local runs

pub mod memory_definition_store;
pub mod pg_definition_store;

pub use memory_definition_store::InMemoryDefinitionStore;
pub use pg_definition_store::PgDefinitionStore;
