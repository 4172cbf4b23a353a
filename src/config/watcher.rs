//! Route table watcher for hot reload.
//!
//! A changed file is parsed, validated and compiled into a fresh `Router` on
//! the watcher thread. Only a complete router is sent on; a broken file
//! leaves the current table in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{build_router, load_config, ConfigError};
use crate::config::schema::RouteConfig;
use crate::observability::metrics;
use crate::routing::Router;

/// A freshly compiled route table.
pub type RouterUpdate = Arc<Router<RouteConfig>>;

/// Watches a route file and publishes compiled routers.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterUpdate>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for compiled route tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterUpdate>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?path, "Route file change detected, reloading");
                    match reload(&path) {
                        Ok(router) => {
                            metrics::record_reload("success");
                            let _ = tx.send(Arc::new(router));
                        }
                        Err(e) => {
                            metrics::record_reload("failure");
                            tracing::error!(error = %e, "Failed to reload routes. Keeping current table.");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route watcher started");
        Ok(watcher)
    }
}

/// Loads, validates and compiles the route file at `path`.
pub fn reload(path: &Path) -> Result<Router<RouteConfig>, ConfigError> {
    let config = load_config(path)?;
    Ok(build_router(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reload_compiles_router() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[routes]]\nname = \"a\"\nmethod = \"GET\"\npath = \"/a/:id\"").unwrap();

        let router = reload(file.path()).unwrap();
        assert_eq!(router.len(), 1);
        assert_eq!(router.at("GET", "/a/1").unwrap().value.name, "a");
    }

    #[test]
    fn test_reload_rejects_conflicts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[routes]]\nname = \"a\"\npath = \"/a/:x\"\n[[routes]]\nname = \"b\"\npath = \"/a/:y\""
        )
        .unwrap();

        assert!(matches!(reload(file.path()), Err(ConfigError::Validation(_))));
    }
}
