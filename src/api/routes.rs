//! API route configuration.

use crate::api::handlers::{
    get_object_handler, history_handler, page_count_handler, page_handler, store_object_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

/// Object storage and call history routes.
///
/// # Endpoints
///
/// - `PUT /objects`               - Store a value under a new random key
/// - `GET /objects/{key}`         - Read a value (`?as=str|int|float|raw`)
/// - `GET /history/{operation}`   - Replay the recorded calls of an operation
pub fn object_routes() -> Router<AppState> {
    Router::new()
        .route("/objects", put(store_object_handler))
        .route("/objects/{key}", get(get_object_handler))
        .route("/history/{operation}", get(history_handler))
}

/// Page cache routes. Cache misses trigger outbound requests, so these are
/// rate limited separately in [`crate::routes::app_router`].
///
/// # Endpoints
///
/// - `GET /pages?url=<url>`        - Page body, cached with TTL
/// - `GET /pages/count?url=<url>`  - Access count for a URL
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/pages", get(page_handler))
        .route("/pages/count", get(page_count_handler))
}
