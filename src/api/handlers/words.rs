//! Handler for the distinct word listing.

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};

use crate::api::dto::pagination::{ListQueryParams, continuation_headers};
use crate::error::AppError;
use crate::state::AppState;

/// Lists the distinct words of one page of definitions.
///
/// # Endpoint
///
/// `GET /api/words`
///
/// # Query Parameters
///
/// Same as `GET /api/definitions`.
///
/// # Response
///
/// A JSON array of strings. Words are distinct within the page only; a word
/// may reappear on a later page.
pub async fn list_words_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> Result<(HeaderMap, Json<Vec<String>>), AppError> {
    let page = state
        .dictionary
        .get_words(&params.filter(), params.page_token())
        .await?;

    let headers = continuation_headers(page.next_page_token.as_ref());
    Ok((headers, Json(page.items)))
}
