//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod definitions;
pub mod health;
pub mod words;

pub use definitions::{
    create_definition_handler, get_definition_handler, list_definitions_handler,
    random_definition_handler, update_definition_handler,
};
pub use health::health_handler;
pub use words::list_words_handler;
