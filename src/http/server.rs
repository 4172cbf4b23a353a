//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the dispatch and introspection handlers
//! - Wire up middleware (tracing, request timeout)
//! - Hold the active route table and swap in reloaded ones
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{build_router, RouteConfig, RouterUpdate, ServerConfig};
use crate::http::handlers::{dispatch, list_routes, resolve};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::routing::{RouteError, Router as RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    routes: Arc<ArcSwap<RouteTable<RouteConfig>>>,
}

impl AppState {
    pub fn new(table: RouteTable<RouteConfig>) -> Self {
        metrics::record_routes(table.len());
        Self {
            routes: Arc::new(ArcSwap::from_pointee(table)),
        }
    }

    /// Snapshot of the active route table.
    ///
    /// A request keeps the snapshot it started with even if a reload lands
    /// mid-flight.
    pub fn table(&self) -> Arc<RouteTable<RouteConfig>> {
        self.routes.load_full()
    }

    /// Publish a fully built route table.
    pub fn swap(&self, table: RouterUpdate) {
        metrics::record_routes(table.len());
        self.routes.store(table);
    }
}

/// HTTP server fronting a route table.
pub struct HttpServer {
    app: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, compiling the routes in `config`.
    pub fn new(config: &ServerConfig) -> Result<Self, RouteError> {
        let table = build_router(config)?;
        Ok(Self::with_table(table, Duration::from_secs(config.timeouts.request_secs)))
    }

    /// Create a server around an already compiled route table.
    pub fn with_table(table: RouteTable<RouteConfig>, request_timeout: Duration) -> Self {
        let state = AppState::new(table);
        let app = Self::build_app(state.clone(), request_timeout);
        Self { app, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/_router/routes", get(list_routes))
            .route("/_router/resolve", get(resolve))
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum app, for driving the server in-process.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Handle to the live route table.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Route tables received on `config_updates` replace the active one.
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterUpdate>,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut reload_shutdown = shutdown.subscribe();
        let reloads = tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(table) => {
                            tracing::info!(routes = table.len(), "Swapping in reloaded route table");
                            state.swap(table);
                        }
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        let mut serve_shutdown = shutdown.subscribe();
        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = serve_shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloads.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
