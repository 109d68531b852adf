//! GitHub gateway server.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  GATEWAY                     │
//!   Browser               │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!   ──────────────────────┼─▶│  http    │──▶│ gateway  │──▶│ upstream │──┼──▶ api.github.com
//!   /api/github?path=...  │  │ server   │   │ handler  │   │  client  │  │    (+ Authorization)
//!                         │  └──────────┘   └──────────┘   └──────────┘  │
//!   ◀─────────────────────┼── 200 + Cache-Control | {error, details?}    │
//!                         │                                              │
//!                         │  config (+ watcher) · observability ·        │
//!                         │  security headers · lifecycle                │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use github_gateway::config::{load_config, ConfigWatcher, GatewayConfig};
use github_gateway::lifecycle::Shutdown;
use github_gateway::observability::{logging, metrics};
use github_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "github-gateway")]
#[command(about = "Credentialed proxy for the GitHub REST API", long_about = None)]
struct Args {
    /// TOML configuration file. Watched for changes when given.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "github-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        credential_var = %config.credential.env_var,
        allowed_prefixes = config.upstream.allowed_prefixes.len(),
        static_dir = ?config.site.static_dir,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher must outlive the server.
    let (config_updates, _watcher) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.clone().trigger_on_signal());

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
