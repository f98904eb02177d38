//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into dictionary repository calls and
//! formats responses. It holds no business rules of its own.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
