//! API route configuration.

use crate::api::handlers::{
    create_definition_handler, get_definition_handler, list_definitions_handler,
    list_words_handler, random_definition_handler, update_definition_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Dictionary API routes.
///
/// # Endpoints
///
/// - `GET  /definitions`          - List definitions (paginated, optional `tag`)
/// - `POST /definitions`          - Create a definition
/// - `GET  /definitions/random`   - One definition chosen uniformly at random
/// - `GET  /definitions/{id}`     - Fetch a definition by id
/// - `PUT  /definitions/{id}`     - Update a definition (`mode=replace|merge`)
/// - `GET  /words`                - Distinct words of one page of definitions
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/definitions",
            get(list_definitions_handler).post(create_definition_handler),
        )
        .route("/definitions/random", get(random_definition_handler))
        .route(
            "/definitions/{id}",
            get(get_definition_handler).put(update_definition_handler),
        )
        .route("/words", get(list_words_handler))
}
