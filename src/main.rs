//! Record Cache - a read-through cache in front of a slow record store
//!
//! Serves records over HTTP, caching lookups with TTL expiration and LRU
//! eviction and coalescing concurrent misses.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use record_cache::{create_router, spawn_purge_task, AppState, Config};

/// Main entry point for the record cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the cache, backing store and record service
/// 4. Start background TTL purge task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "record_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting record cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, ttl={}ms, purge_interval={}s, port={}, fetch_latency={}ms",
        config.max_entries,
        config.ttl_ms,
        config.purge_interval_secs,
        config.server_port,
        config.fetch_latency_ms
    );

    let state = AppState::from_config(&config);
    info!("Cache and record service initialized");
    if state.limits.is_enabled() {
        info!(
            "Rate limits: {} per {}s, burst {} per {}s",
            config.rate_limit_max,
            config.rate_limit_window_secs,
            config.burst_limit_max,
            config.burst_limit_window_secs
        );
    } else {
        warn!("Rate limiting disabled");
    }

    let purge_handle = spawn_purge_task(state.cache.clone(), config.purge_interval());
    info!("Background purge task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);
    info!("Users API: http://{}/users/:id", addr);
    info!("Cache status: http://{}/cache-status", addr);

    // Client addresses key the rate limiters
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(purge_handle))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the purge task and allows graceful shutdown.
async fn shutdown_signal(purge_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    purge_handle.abort();
    warn!("Purge task aborted");
}
