//! docgen-ui - Browser client for the documentation-generation backend
//!
//! Serves the upload page, submits media files to the backend, and tracks
//! each upload until its generated documentation can be previewed and
//! downloaded.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use docgen_common::config::{resolve_config_path, ClientConfig, ConfigOverrides, TomlConfig};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docgen_ui::{build_router, AppState};

/// Command-line arguments for docgen-ui
#[derive(Parser, Debug)]
#[command(name = "docgen-ui")]
#[command(about = "Browser client for the project documentation generator")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "DOCGEN_UI_PORT")]
    port: Option<u16>,

    /// Interface to bind
    #[arg(long, env = "DOCGEN_UI_BIND")]
    bind: Option<String>,

    /// Documentation backend base URL
    #[arg(short, long, env = "DOCGEN_BACKEND_URL")]
    backend_url: Option<String>,

    /// Config file (defaults to DOCGEN_CONFIG, then ~/.config/docgen/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgen_ui=info,docgen_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting docgen-ui v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // CLI/ENV → TOML → compiled defaults
    let file_config = match resolve_config_path(args.config.as_deref()) {
        Some(path) if args.config.is_some() => TomlConfig::load(&path)?,
        Some(path) => TomlConfig::load_or_default(&path)?,
        None => TomlConfig::default(),
    };
    let overrides = ConfigOverrides {
        backend_url: args.backend_url,
        port: args.port,
        bind_address: args.bind,
    };
    let config = ClientConfig::resolve(&overrides, &file_config)?;

    info!("Backend: {}", config.backend_url);
    match config.auto_poll_interval {
        Some(interval) => info!("Background readiness polling every {:?}", interval),
        None => info!("Readiness polling on page refresh only"),
    }

    let shutdown = CancellationToken::new();
    let state = AppState::from_config(&config, shutdown.clone())
        .context("Failed to create backend client")?;
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.bind_address, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
///
/// Cancels background pollers before the server stops accepting requests.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }

    shutdown.cancel();
}
