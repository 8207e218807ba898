//! Record Server - a record-management service over a persistent socket
//!
//! Speaks a line-delimited JSON request/response protocol, authenticates
//! clients with signed tokens, and fronts the record store with an in-memory
//! cache using TTL expiration and LRU eviction.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Construct the shared services (store, cache, users, tokens)
//! 4. Start the background TTL sweep task
//! 5. Bind the listener and run the accept loop
//! 6. Handle graceful shutdown on SIGINT/SIGTERM

mod auth;
mod cache;
mod config;
mod error;
mod models;
mod server;
mod store;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::{TokenService, UserDirectory};
use cache::RecordCache;
use config::Config;
use server::Dispatcher;
use store::MemoryStore;
use tasks::spawn_sweep_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "record_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Record Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_capacity={}, cache_ttl={}s, sweep_interval={}s, token_ttl={}s",
        config.server_port, config.cache_capacity, config.cache_ttl, config.sweep_interval, config.token_ttl
    );

    // Construct shared services once and pass them by handle
    let cache = Arc::new(RwLock::new(RecordCache::new(
        config.cache_capacity,
        config.cache_ttl,
    )));
    let store = Arc::new(MemoryStore::new());
    let users = Arc::new(UserDirectory::with_default_users().context("building user directory")?);
    let tokens = TokenService::new(config.token_secret.clone(), config.token_ttl);

    let dispatcher = Arc::new(Dispatcher::new(cache.clone(), store, users, tokens));

    // Start background sweep task
    let mut sweep_handle = spawn_sweep_task(cache, config.sweep_interval);
    info!("Background sweep task started");

    // Bind the listener and serve until shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on {}", addr);

    tokio::select! {
        result = server::serve(listener, dispatcher) => {
            result.context("accept loop failed")?;
        }
        _ = shutdown_signal() => {}
    }

    sweep_handle.shutdown();
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    warn!("Shutting down");
}
