//! File watcher for workspace and theme files.
//!
//! Watches the workspace `.rabital/` directory and the shared themes
//! directory, emitting classified reload events through a tokio watch channel.
//! Uses debouncing to coalesce rapid file changes; the host application reacts
//! by re-resolving the snapshot store.

use notify_debouncer_mini::{DebouncedEventKind, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::loader::{DEBUG_FILE, SETTINGS_FILE, TASKS_FILE};

/// Event types emitted when watched files change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChangeEvent {
    /// One of the `.rabital` documents changed (settings.yml, tasks.yml, debug.yml)
    ProjectConfig(PathBuf),
    /// A theme file was added, modified, or removed
    Theme(PathBuf),
    /// Multiple files changed in quick succession
    Batch(Vec<PathBuf>),
    /// Watcher encountered an error
    Error(String),
}

impl ConfigChangeEvent {
    /// Returns true if this event should trigger a snapshot re-resolve.
    pub fn requires_reload(&self) -> bool {
        !matches!(self, ConfigChangeEvent::Error(_))
    }

    /// The paths affected by this event.
    pub fn affected_paths(&self) -> Vec<&Path> {
        match self {
            ConfigChangeEvent::ProjectConfig(p) | ConfigChangeEvent::Theme(p) => {
                vec![p.as_path()]
            }
            ConfigChangeEvent::Batch(paths) => paths.iter().map(|p| p.as_path()).collect(),
            ConfigChangeEvent::Error(_) => vec![],
        }
    }
}

/// Tuning for the config watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce duration for coalescing rapid changes.
    pub debounce_duration: Duration,
    /// Whether to watch the project `.rabital` directory.
    pub watch_project: bool,
    /// Whether to watch the shared themes directory.
    pub watch_themes: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_duration: Duration::from_millis(500),
            watch_project: true,
            watch_themes: true,
        }
    }
}

/// Directories to watch.
#[derive(Debug, Clone)]
pub struct WatchPaths {
    /// Workspace `.rabital` directory.
    pub project_dir: Option<PathBuf>,
    /// Shared themes directory.
    pub themes_dir: Option<PathBuf>,
}

/// Handle to the running watcher.
///
/// Dropping the handle stops the watcher task.
pub struct ConfigWatcherHandle {
    /// Receiver for change events. Clone for multiple consumers.
    pub events: watch::Receiver<Option<ConfigChangeEvent>>,
    _task_handle: tokio::task::JoinHandle<()>,
}

impl ConfigWatcherHandle {
    /// Wait for the next change event.
    pub async fn wait_for_change(&mut self) -> Option<ConfigChangeEvent> {
        // Skip the initial None value
        loop {
            if self.events.changed().await.is_err() {
                return None; // Sender dropped
            }
            let event = self.events.borrow().clone();
            if event.is_some() {
                return event;
            }
        }
    }

    /// Check for a pending change without blocking.
    pub fn has_pending_change(&self) -> bool {
        self.events.borrow().is_some()
    }
}

/// Start watching the configured directories.
///
/// Directories that do not exist yet are skipped with a warning; the caller
/// should restart the watcher after `set_workspace` creates or changes them.
pub fn start_config_watcher(
    paths: WatchPaths,
    config: WatcherConfig,
) -> Result<ConfigWatcherHandle, notify::Error> {
    let (event_tx, event_rx) = watch::channel(None);
    let (notify_tx, notify_rx) = mpsc::channel();

    let mut debouncer = new_debouncer(config.debounce_duration, notify_tx)?;
    let watcher = debouncer.watcher();

    if config.watch_project
        && let Some(ref project_dir) = paths.project_dir
    {
        if project_dir.exists() {
            info!("watching project config: {}", project_dir.display());
            watcher.watch(project_dir, notify::RecursiveMode::NonRecursive)?;
        } else {
            warn!(
                "project config directory does not exist, skipping watch: {}",
                project_dir.display()
            );
        }
    }

    if config.watch_themes
        && let Some(ref themes_dir) = paths.themes_dir
    {
        if themes_dir.exists() {
            info!("watching themes: {}", themes_dir.display());
            watcher.watch(themes_dir, notify::RecursiveMode::NonRecursive)?;
        } else {
            warn!(
                "themes directory does not exist, skipping watch: {}",
                themes_dir.display()
            );
        }
    }

    let task_handle = tokio::task::spawn_blocking(move || {
        // Keep the debouncer alive for the lifetime of the task
        let _debouncer = debouncer;
        process_notify_events(notify_rx, event_tx, &paths);
    });

    Ok(ConfigWatcherHandle {
        events: event_rx,
        _task_handle: task_handle,
    })
}

/// Forward debounced notify events as classified change events.
fn process_notify_events(
    rx: mpsc::Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    tx: watch::Sender<Option<ConfigChangeEvent>>,
    paths: &WatchPaths,
) {
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in classify_events(events, paths) {
                    debug!("config change detected: {:?}", event);
                    if tx.send(Some(event)).is_err() {
                        info!("config watcher receiver dropped, stopping");
                        return;
                    }
                }
            }
            Ok(Err(e)) => {
                error!("file watcher error: {}", e);
                let _ = tx.send(Some(ConfigChangeEvent::Error(e.to_string())));
            }
            Err(_) => {
                info!("config watcher channel closed, stopping");
                return;
            }
        }
    }
}

/// Coalesce debounced events into at most one change event.
fn classify_events(
    events: Vec<notify_debouncer_mini::DebouncedEvent>,
    paths: &WatchPaths,
) -> Vec<ConfigChangeEvent> {
    let mut changed_paths: Vec<PathBuf> = Vec::new();

    for event in events {
        if !matches!(
            event.kind,
            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
        ) {
            continue;
        }
        if classify_path(&event.path, paths).is_some() {
            changed_paths.push(event.path);
        }
    }

    if changed_paths.len() > 1 {
        vec![ConfigChangeEvent::Batch(changed_paths)]
    } else if let Some(path) = changed_paths.into_iter().next()
        && let Some(event) = classify_path(&path, paths)
    {
        vec![event]
    } else {
        Vec::new()
    }
}

/// Classify a single path, or `None` if it is not a watched config file.
fn classify_path(path: &Path, paths: &WatchPaths) -> Option<ConfigChangeEvent> {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if let Some(ref project_dir) = paths.project_dir
        && path.starts_with(project_dir)
    {
        // Only the three known documents matter inside .rabital
        if matches!(file_name, SETTINGS_FILE | TASKS_FILE | DEBUG_FILE) {
            return Some(ConfigChangeEvent::ProjectConfig(path.to_path_buf()));
        }
        return None;
    }

    if let Some(ref themes_dir) = paths.themes_dir
        && path.starts_with(themes_dir)
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        )
    {
        return Some(ConfigChangeEvent::Theme(path.to_path_buf()));
    }

    None
}
