//! Replace-on-update snapshot store.
//!
//! `set_workspace` resolves a fresh [`ResolvedConfig`] and swaps it in
//! atomically, so readers on other threads never observe a partially updated
//! configuration.

use super::loader::{ResolvedConfig, ResolverPaths};
use super::themes;
use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Long-lived owner of the resolved configuration.
///
/// Constructed once per application session. Reads are lock-free; workspace
/// changes rebuild the snapshot and swap it whole.
#[derive(Debug)]
pub struct ConfigStore {
    paths: ArcSwap<ResolverPaths>,
    current: ArcSwap<ResolvedConfig>,
}

impl ConfigStore {
    /// Create a store and resolve an initial snapshot for the given paths.
    pub fn new(paths: ResolverPaths) -> Self {
        let snapshot = ResolvedConfig::resolve(&paths);
        Self {
            paths: ArcSwap::from_pointee(paths),
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Create a store from environment discovery.
    pub fn from_env() -> Self {
        Self::new(ResolverPaths::discover())
    }

    /// The current immutable snapshot.
    pub fn current(&self) -> Arc<ResolvedConfig> {
        self.current.load_full()
    }

    /// The paths the store resolves against.
    pub fn paths(&self) -> Arc<ResolverPaths> {
        self.paths.load_full()
    }

    /// Point the store at a new workspace and re-resolve everything.
    ///
    /// Missing or malformed project files are a normal condition; the new
    /// snapshot falls back per document and is always usable.
    pub fn set_workspace(&self, workspace: Option<PathBuf>) -> Arc<ResolvedConfig> {
        let paths = self.paths.load().with_workspace(workspace);
        match &paths.workspace {
            Some(ws) => info!("switching workspace to {}", ws.display()),
            None => info!("clearing workspace"),
        }
        let snapshot = Arc::new(ResolvedConfig::resolve(&paths));
        self.paths.store(Arc::new(paths));
        self.current.store(Arc::clone(&snapshot));
        snapshot
    }

    /// Re-resolve the current workspace, e.g. after a file change event.
    pub fn reload(&self) -> Arc<ResolvedConfig> {
        let paths = self.paths.load_full();
        let snapshot = Arc::new(ResolvedConfig::resolve(&paths));
        self.current.store(Arc::clone(&snapshot));
        snapshot
    }

    /// Theme names available in the shared themes directory.
    pub fn list_themes(&self) -> Vec<String> {
        themes::list_themes(&self.paths.load())
    }

    /// Content of a named theme, or `None` if it does not exist.
    pub fn load_theme(&self, name: &str) -> Option<String> {
        themes::load_theme(&self.paths.load(), name)
    }
}
