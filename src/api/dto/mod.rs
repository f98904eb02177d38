//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Responses serialize domain entities directly.

pub mod definition;
pub mod health;
pub mod pagination;
