//! Application entry point and server initialization
//!
//! Loads environment configuration, opens the mapping store, and starts the
//! HTTP server with graceful shutdown support.

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

mod config;
mod error;
mod generator;
mod handler;
mod model;
mod route;
mod store;

use config::Config;
use route::create_app;
use store::{AppState, MappingStore};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("linklet=debug,tower_http=debug")
        .init();

    let config = Config::from_env();

    // Open the store once; the handle is cloned into every request handler.
    // Schema setup is idempotent, so restarts against an existing file are safe.
    let store = MappingStore::open(&config.database_path, config.code_length)
        .expect("Failed to open mapping store");

    let state = AppState {
        store,
        fallback_origin: format!("http://localhost:{}", config.port),
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    info!(
        port = config.port,
        database = %config.database_path,
        code_length = config.code_length,
        "server listening"
    );

    // The server runs until it receives SIGTERM or SIGINT, letting open
    // connections and in-flight transactions finish cleanly.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Resolves when a shutdown signal is received.
///
/// Listens for SIGINT (Ctrl+C) everywhere and additionally SIGTERM on Unix,
/// the usual termination signal under Docker/Kubernetes.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
