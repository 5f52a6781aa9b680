//! HTTP API for skeleton generation.
//!
//! Endpoints:
//! - `POST /api/generate` - remote generation through the chat-completions
//!   service
//! - `POST /api/skeleton` - local rule-based engine
//! - `GET /api/health` - liveness and version
//!
//! Both generation endpoints take `{"component": "..."}`.
//!
//! # Quick Start
//!
//! ```ignore
//! use skel_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use skel_config::GeneratorConfig;
use skel_engine::ShapeOptions;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Synthetic shape counts for the local engine.
    pub shape_options: ShapeOptions,
    /// Remote generator settings.
    pub generator: GeneratorConfig,
    /// Application version reported by the health endpoint.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            shape_options: ShapeOptions::default(),
            generator: GeneratorConfig::default(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener cannot bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(
        config.shape_options,
        &config.generator,
        config.version.clone(),
    ));
    if !state.remote_enabled() {
        tracing::warn!("No generator API key configured, /api/generate will fail");
    }

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Synthetic shape counts from the `[engine]` config section.
#[must_use]
pub fn shape_options_from_config(engine: &skel_config::EngineConfig) -> ShapeOptions {
    ShapeOptions {
        table_columns: engine.table_columns,
        table_rows: engine.table_rows,
        list_items: engine.list_items,
        row_cells: engine.row_cells,
    }
}

/// Create server configuration from skel config.
#[must_use]
pub fn server_config_from_config(config: &skel_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        shape_options: shape_options_from_config(&config.engine),
        generator: config.generator.clone(),
        version,
    }
}
