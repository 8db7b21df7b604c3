//! Handlers for the page cache endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde_json::json;

use crate::api::dto::pages::{PageCountResponse, PageQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::page_url::validate_page_url;

/// Returns the body of a page, served from cache while its TTL lasts.
///
/// # Endpoint
///
/// `GET /pages?url=<url>`
///
/// # Cache Strategy
///
/// - Every request increments the URL's access counter
/// - **Cache hit**: body returned without a network call
/// - **Cache miss**: page fetched, cached with the configured TTL, returned
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is not an absolute HTTP(S) URL.
/// Returns 502 Bad Gateway if the page cannot be fetched.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_page_url(&query.url).map_err(|e| {
        AppError::bad_request(
            "Invalid page URL",
            json!({ "url": query.url, "reason": e.to_string() }),
        )
    })?;

    let body = state.pages.get_page(&query.url).await?;

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}

/// Returns how many times a page has been requested.
///
/// # Endpoint
///
/// `GET /pages/count?url=<url>`
///
/// # Response
///
/// ```json
/// { "url": "http://example.com", "count": 3 }
/// ```
pub async fn page_count_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageCountResponse>, AppError> {
    let count = state.pages.access_count(&query.url).await?;

    Ok(Json(PageCountResponse {
        url: query.url,
        count,
    }))
}
