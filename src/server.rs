//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, service wiring, and Axum server lifecycle.

use crate::application::services::{FetchCache, InstrumentedCache};
use crate::config::{Config, mask_connection_string};
use crate::infrastructure::http::HttpFetcher;
use crate::infrastructure::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Opens the store selected by `config.store_backend`.
///
/// # Errors
///
/// Returns an error if the Redis server cannot be reached.
pub async fn build_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    if config.uses_memory_store() {
        tracing::info!("Store: in-process memory (data is lost on exit)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = RedisStore::connect(&config.redis_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to Redis at {}",
                mask_connection_string(&config.redis_url)
            )
        })?;

    tracing::info!("Connected to Redis");
    Ok(Arc::new(store))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key-value store (Redis or in-process)
/// - Optional `FLUSHDB` on startup
/// - Object cache and page cache services
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Store connection fails
/// - Startup flush fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;

    let objects = Arc::new(InstrumentedCache::new(store.clone()));

    if config.flush_on_startup {
        objects
            .flush()
            .await
            .context("Failed to flush store on startup")?;
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(config.fetch_timeout_seconds))
        .context("Failed to build HTTP client")?;

    let pages = Arc::new(FetchCache::new(
        store.clone(),
        Arc::new(fetcher),
        config.page_cache_ttl_seconds,
    ));

    let state = AppState::new(objects, pages, store);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
