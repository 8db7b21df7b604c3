//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                - Store health check
//! - `PUT  /objects`               - Store a value
//! - `GET  /objects/{key}`         - Read a value
//! - `GET  /history/{operation}`   - Call history replay
//! - `GET  /pages?url=`            - Cached page fetch (rate limited)
//! - `GET  /pages/count?url=`      - Page access count (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on page routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let page_router = if behind_proxy {
        api::routes::page_routes().layer(rate_limit::proxy_layer())
    } else {
        api::routes::page_routes().layer(rate_limit::layer())
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::object_routes())
        .merge(page_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
