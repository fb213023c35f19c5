//! HTTP server initialization and runtime setup.
//!
//! Selects the cache store, builds the Potter API client and runs the Axum
//! server until Ctrl-C.

use crate::application::services::HouseLookupService;
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::potter::PotterApiClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Chooses the cache store once, at startup.
///
/// - Caching disabled → [`NullCache`]
/// - Redis configured and reachable → [`RedisCache`]
/// - Redis configured but unreachable → [`MemoryCache`] with a warning
/// - Otherwise → [`MemoryCache`]
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    if !config.is_cache_enabled() {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
            }
        }
    } else {
        tracing::info!("Cache enabled (in-memory)");
    }

    Arc::new(MemoryCache::new())
}

/// Builds the house lookup from configuration.
///
/// # Errors
///
/// Returns an error if the Potter API client cannot be built.
pub async fn build_lookup(config: &Config) -> Result<Arc<HouseLookupService>> {
    let client_config = config.client_config();
    let client =
        PotterApiClient::new(&client_config).context("Failed to build Potter API client")?;
    let cache = build_cache(config).await;

    Ok(Arc::new(HouseLookupService::new(
        Arc::new(client),
        cache,
        client_config.effective_cache_ttl(),
    )))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The Potter API client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let lookup = build_lookup(&config).await?;
    tracing::info!("House lookup ready for {}", lookup.endpoint());

    let state = AppState::new(lookup);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
