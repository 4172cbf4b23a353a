//! Route table stub server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ route table snapshot ──▶ configured response
//!                          ▲                   ▲
//!                          │                   │ ArcSwap::store
//!                     shutdown            config watcher
//!                   (SIGINT/TERM)       (route file changes)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use trie_router::config::{load_config, ConfigWatcher};
use trie_router::lifecycle::{forward_signals, Shutdown};
use trie_router::observability::{logging, metrics};
use trie_router::HttpServer;

#[derive(Parser)]
#[command(name = "trie-router")]
#[command(about = "Serve a route table through the radix trie router", long_about = None)]
struct Args {
    /// Route table to load.
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Reload the route table when the file changes.
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("trie-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        path = ?args.config,
        routes = config.routes.len(),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
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

    let server = HttpServer::new(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for the lifetime of the server.
    let (updates, _watcher) = if args.watch {
        let (watcher, updates) = ConfigWatcher::new(&args.config);
        (updates, Some(watcher.run()?))
    } else {
        let (_tx, updates) = mpsc::unbounded_channel();
        (updates, None)
    };

    let shutdown = Shutdown::new();
    tokio::spawn(forward_signals(shutdown.clone()));

    server.run(listener, updates, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
