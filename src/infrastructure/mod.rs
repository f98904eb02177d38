//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Lookup cache abstractions (Redis and no-op implementations)
//! - [`persistence`] - Definition store implementations
pub mod cache;
pub mod persistence;
