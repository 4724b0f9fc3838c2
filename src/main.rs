//! Bhaktamar Voice Bot Edge Gateway
//!
//! A single-binary HTTP gateway fronting the voice-bot backend, built with
//! Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                EDGE GATEWAY                    │
//!                    │                                                │
//!   Browser ────────▶│  http/server ──▶ routing ──▶ hyper client ────┼──▶ voice-bot
//!   (any origin)     │      │              │                          │    backend
//!   ◀────────────────┼── http/response ◀──┘                          │   (rooms,
//!                    │   (CORS on every branch)                       │    health)
//!                    │                                                │
//!                    │  ┌──────────┐ ┌──────────────┐ ┌───────────┐  │
//!                    │  │  config  │ │observability │ │ lifecycle │  │
//!                    │  │ + reload │ │ logs/metrics │ │  shutdown │  │
//!                    │  └──────────┘ └──────────────┘ └───────────┘  │
//!                    └───────────────────────────────────────────────┘
//! ```
//!
//! Requests under `/api/` are rewritten onto the backend origin; OPTIONS is
//! answered locally as a CORS preflight; everything else gets a fixed
//! service note. The voice pipeline itself (STT/LLM/TTS, WebRTC rooms)
//! lives entirely behind the backend.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bhaktamar_edge::config::loader::resolve_config;
use bhaktamar_edge::config::watcher::ConfigWatcher;
use bhaktamar_edge::lifecycle::{signals, Shutdown};
use bhaktamar_edge::observability::metrics;
use bhaktamar_edge::HttpServer;

#[derive(Parser)]
#[command(name = "bhaktamar-edge")]
#[command(about = "Edge gateway for the Bhaktamar voice bot backend", long_about = None)]
struct Args {
    /// Path to the gateway configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bhaktamar_edge=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("bhaktamar-edge v0.1.0 starting");

    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.listener.bind_address = listen;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_origin = %config.upstream.origin,
        public_prefix = %config.upstream.public_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Hot reload only applies when a config file is in play; without one
    // the update channel simply stays idle.
    let (config_updates, _watcher_guard) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let guard = watcher.run()?;
            (updates, Some(guard))
        }
        None => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::listen(&shutdown);

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
