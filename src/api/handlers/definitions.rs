//! Handlers for definition endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::definition::{DefinitionRequest, UpdateQueryParams};
use crate::api::dto::pagination::{ListQueryParams, continuation_headers};
use crate::domain::entities::Definition;
use crate::error::AppError;
use crate::infrastructure::cache::lookup;
use crate::state::AppState;

/// Lists one page of definitions.
///
/// # Endpoint
///
/// `GET /api/definitions`
///
/// # Query Parameters
///
/// - `tag` (optional): restrict to one tag
/// - `continuation` (optional): token from the previous page
///
/// # Response
///
/// A JSON array of definitions. When more pages exist the
/// `x-continuation-token` header carries the token for the next one.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed continuation token.
pub async fn list_definitions_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<(HeaderMap, Json<Vec<Definition>>), AppError> {
    let page = state
        .dictionary
        .get_definitions(&params.filter(), params.page_token())
        .await?;

    let headers = continuation_headers(page.next_page_token.as_ref());
    Ok((headers, Json(page.items)))
}

/// Returns one definition chosen uniformly at random.
///
/// # Endpoint
///
/// `GET /api/definitions/random`
///
/// # Errors
///
/// Returns 404 Not Found with code `empty_collection` when the dictionary is empty.
pub async fn random_definition_handler(
    State(state): State<AppState>,
) -> Result<Json<Definition>, AppError> {
    let definition = state.dictionary.get_random_definition().await?;
    Ok(Json(definition))
}

/// Fetches a definition by identifier.
///
/// # Endpoint
///
/// `GET /api/definitions/{id}`
///
/// # Cache
///
/// Reads through the lookup cache. A miss is filled from the store, but the
/// fill never replaces an entry written by a concurrent update.
///
/// # Errors
///
/// Returns 404 Not Found if no definition has this id.
pub async fn get_definition_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Definition>, AppError> {
    if let Some(definition) = lookup::cached(state.cache.as_ref(), &id).await {
        return Ok(Json(definition));
    }

    let definition = state.dictionary.get_definition(&id).await?;
    lookup::fill(state.cache.as_ref(), &definition).await;

    Ok(Json(definition))
}

/// Creates a definition.
///
/// # Endpoint
///
/// `POST /api/definitions`
///
/// # Request Body
///
/// ```json
/// {
///   "word": "latency",
///   "content": "Time between a request and its response.",
///   "learn_more_url": "https://example.com/latency",  // optional
///   "tag": "networking",                               // optional
///   "abbreviation": "lat",                             // optional
///   "author_name": "Ada",                              // optional
///   "author_link": "https://example.com/ada"           // optional
/// }
/// ```
///
/// # Response
///
/// 201 Created with the stored definition, including its assigned `id`.
///
/// # Errors
///
/// Returns 400 Bad Request if `word` or `content` is missing or a URL field is invalid.
pub async fn create_definition_handler(
    State(state): State<AppState>,
    Json(payload): Json<DefinitionRequest>,
) -> Result<(StatusCode, Json<Definition>), AppError> {
    payload.validate()?;

    let definition = state.dictionary.add_definition(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(definition)))
}

/// Updates an existing definition.
///
/// # Endpoint
///
/// `PUT /api/definitions/{id}?mode=replace|merge`
///
/// # Modes
///
/// - `replace`: every mutable field takes the request value; omitted
///   optional fields are erased
/// - `merge`: omitted fields keep their stored value
///
/// Without `mode` the server's `UPDATE_POLICY` applies.
///
/// # Cache
///
/// The updated definition is written to the cache after a successful update.
///
/// # Errors
///
/// Returns 404 Not Found if the definition doesn't exist; it is never created.
/// This takes precedence over request validation.
/// Returns 400 Bad Request if a field is malformed or the result would lack a
/// word or content.
pub async fn update_definition_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Query(query): Query<UpdateQueryParams>,
    Json(payload): Json<DefinitionRequest>,
) -> Result<Json<Definition>, AppError> {
    if let Err(errors) = payload.validate() {
        state.dictionary.get_definition(&id).await?;
        return Err(errors.into());
    }

    let policy = query.mode.unwrap_or(state.default_update_policy);
    let definition = state
        .dictionary
        .update_definition(&id, payload.into(), policy)
        .await?;

    lookup::refresh(state.cache.as_ref(), &definition).await;

    Ok(Json(definition))
}
