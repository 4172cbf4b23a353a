//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use trie_router::config::{RouteConfig, RouterUpdate, ServerConfig};
use trie_router::{HttpServer, Shutdown};

/// A route table exercising static, parameter, catch-all and fallback routes.
pub fn sample_config() -> ServerConfig {
    let mut created = RouteConfig::new("create-user", "POST", "/user");
    created.status = 201;
    created.body = Some("created".into());

    let mut config = ServerConfig::default();
    config.routes = vec![
        RouteConfig::new("home", "GET", "/"),
        RouteConfig::new("user", "GET", "/user/:name"),
        RouteConfig::new("user-admin", "GET", "/user/admin"),
        created,
        RouteConfig::new("files", "GET", "/static/*file"),
        RouteConfig::new("health", "ANY", "/health"),
    ];
    config
}

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub updates: mpsc::UnboundedSender<RouterUpdate>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Bind `127.0.0.1:0` and serve `config` in the background.
pub async fn spawn_server(config: &ServerConfig) -> TestServer {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (updates, rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, rx, shutdown.clone()));

    TestServer {
        addr,
        updates,
        shutdown,
        handle,
    }
}
