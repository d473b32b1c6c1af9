//! Tier-based resolution of workspace configuration.
//!
//! Three tiers, highest wins: project (`.rabital/*.yml`) > global
//! (`shared/config/*.yml`) > built-in defaults. Each document resolves
//! whole-document, first-found-wins; omitted settings fields fall back to
//! built-in defaults, not to a lower document tier. A document that cannot be
//! read or parsed is treated as absent at that tier.

use super::merge::deep_merge;
use super::types::{DebugConfig, Settings, TasksConfig};
use crate::error::{ConfigError, ConfigResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the hidden project configuration folder.
pub const PROJECT_DIR_NAME: &str = ".rabital";

/// Project document file names.
pub const SETTINGS_FILE: &str = "settings.yml";
pub const TASKS_FILE: &str = "tasks.yml";
pub const DEBUG_FILE: &str = "debug.yml";

/// Global settings file name under `shared/config/`. Singular, a quirk of the
/// original layout.
pub const GLOBAL_SETTINGS_FILE: &str = "setting.yml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Global config under `{appdir}/shared/config/`
    Global = 1,
    /// Project config under `<workspace>/.rabital/` (highest priority)
    Project = 2,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Global => write!(f, "global"),
            ConfigTier::Project => write!(f, "project"),
        }
    }
}

/// Directory roots the resolver reads from.
#[derive(Debug, Clone)]
pub struct ResolverPaths {
    /// Installation directory of the host application.
    pub app_dir: PathBuf,
    /// Currently open workspace, if any.
    pub workspace: Option<PathBuf>,
}

impl ResolverPaths {
    /// Discover paths from the environment.
    ///
    /// The app directory comes from `RABITAL_APP_DIR`, else the directory of
    /// the running executable, else the current directory. The workspace comes
    /// from `RABITAL_WORKSPACE` when set.
    pub fn discover() -> Self {
        let app_dir = std::env::var("RABITAL_APP_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let workspace = std::env::var("RABITAL_WORKSPACE").ok().map(PathBuf::from);

        Self { app_dir, workspace }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(app_dir: PathBuf, workspace: Option<PathBuf>) -> Self {
        Self { app_dir, workspace }
    }

    /// `{appdir}/shared`. Pure path composition, no I/O.
    pub fn shared_dir(&self) -> PathBuf {
        self.app_dir.join("shared")
    }

    /// `{appdir}/shared/themes`. Pure path composition, no I/O.
    pub fn themes_dir(&self) -> PathBuf {
        self.shared_dir().join("themes")
    }

    /// `{appdir}/shared/config`. Pure path composition, no I/O.
    pub fn config_dir(&self) -> PathBuf {
        self.shared_dir().join("config")
    }

    /// The workspace's `.rabital` folder, if a workspace is set. Does not
    /// check for existence.
    pub fn project_dir(&self) -> Option<PathBuf> {
        self.workspace.as_ref().map(|w| w.join(PROJECT_DIR_NAME))
    }

    /// Replace the workspace, keeping the app directory.
    pub fn with_workspace(&self, workspace: Option<PathBuf>) -> Self {
        Self {
            app_dir: self.app_dir.clone(),
            workspace,
        }
    }
}

/// A non-fatal problem encountered while resolving a tier.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub tier: ConfigTier,
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.tier, self.path.display(), self.message)
    }
}

/// An immutable snapshot of the fully resolved configuration.
///
/// Built fresh on every workspace change; never mutated in place.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Workspace the snapshot was resolved for.
    pub workspace: Option<PathBuf>,
    /// Effective settings. Always present, defaults are the base tier.
    pub settings: Settings,
    /// Workspace task definitions, if any tier supplied them.
    pub tasks: Option<TasksConfig>,
    /// Debugger launch configurations, if any tier supplied them.
    pub debug: Option<DebugConfig>,
    /// Problems encountered while resolving. Non-fatal by construction.
    pub diagnostics: Vec<ConfigDiagnostic>,
}

impl ResolvedConfig {
    /// Resolve all three documents for the paths' current workspace.
    pub fn resolve(paths: &ResolverPaths) -> Self {
        let mut diagnostics = Vec::new();
        let project_dir = paths.project_dir().filter(|d| d.is_dir());

        if let Some(ref dir) = project_dir {
            debug!("found project config at {}", dir.display());
        }

        let settings = resolve_settings(paths, project_dir.as_deref(), &mut diagnostics);
        let tasks = resolve_document::<TasksConfig>(
            project_dir.as_deref().map(|d| d.join(TASKS_FILE)),
            paths.config_dir().join(TASKS_FILE),
            &mut diagnostics,
        );
        let debug = resolve_document::<DebugConfig>(
            project_dir.as_deref().map(|d| d.join(DEBUG_FILE)),
            paths.config_dir().join(DEBUG_FILE),
            &mut diagnostics,
        );

        Self {
            workspace: paths.workspace.clone(),
            settings,
            tasks,
            debug,
            diagnostics,
        }
    }
}

/// Read a YAML document into a JSON value for merging.
fn read_yaml_value(path: &Path) -> ConfigResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and deserialize a YAML document directly into `T`.
fn load_document<T: DeserializeOwned>(path: &Path) -> ConfigResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve settings whole-document: the highest tier with a usable
/// `settings.yml` wins outright. Lower document tiers are not consulted once
/// a tier resolves; omitted fields come from built-in defaults.
fn resolve_settings(
    paths: &ResolverPaths,
    project_dir: Option<&Path>,
    diagnostics: &mut Vec<ConfigDiagnostic>,
) -> Settings {
    let defaults = serde_json::to_value(Settings::default()).unwrap_or(Value::Null);

    let candidates = [
        (
            ConfigTier::Project,
            project_dir.map(|d| d.join(SETTINGS_FILE)),
        ),
        (
            ConfigTier::Global,
            Some(paths.config_dir().join(GLOBAL_SETTINGS_FILE)),
        ),
    ];

    for (tier, path) in candidates {
        let Some(path) = path else { continue };
        if !path.is_file() {
            continue;
        }
        match load_settings_document(&path, defaults.clone()) {
            Ok(settings) => {
                debug!("loaded {tier} settings from {}", path.display());
                return settings;
            }
            Err(err) => note_failure(diagnostics, tier, &err),
        }
    }

    Settings::default()
}

/// Parse one tier's settings file, filling omitted fields from defaults.
fn load_settings_document(path: &Path, defaults: Value) -> ConfigResult<Settings> {
    let value = read_yaml_value(path)?;
    serde_json::from_value(deep_merge(defaults, value)).map_err(|source| ConfigError::Shape {
        path: path.to_path_buf(),
        source,
    })
}

/// Record a failing tier as a diagnostic after logging it.
fn note_failure(diagnostics: &mut Vec<ConfigDiagnostic>, tier: ConfigTier, err: &ConfigError) {
    warn!("ignoring {tier} document: {err}");
    diagnostics.push(ConfigDiagnostic {
        tier,
        path: err.path().clone(),
        message: err.to_string(),
    });
}

/// Resolve a whole-document config (tasks or debug): project tier first, then
/// global, else absent. A failing tier is recorded and skipped.
fn resolve_document<T: DeserializeOwned>(
    project_path: Option<PathBuf>,
    global_path: PathBuf,
    diagnostics: &mut Vec<ConfigDiagnostic>,
) -> Option<T> {
    let candidates = [
        (ConfigTier::Project, project_path),
        (ConfigTier::Global, Some(global_path)),
    ];

    for (tier, path) in candidates {
        let Some(path) = path else { continue };
        if !path.is_file() {
            continue;
        }
        match load_document::<T>(&path) {
            Ok(doc) => {
                debug!("loaded {tier} document from {}", path.display());
                return Some(doc);
            }
            Err(err) => note_failure(diagnostics, tier, &err),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths_in(temp: &TempDir) -> ResolverPaths {
        ResolverPaths::with_dirs(
            temp.path().join("app"),
            Some(temp.path().join("workspace")),
        )
    }

    fn write_project_file(temp: &TempDir, name: &str, content: &str) {
        let dir = temp.path().join("workspace").join(PROJECT_DIR_NAME);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn write_global_file(temp: &TempDir, name: &str, content: &str) {
        let dir = temp.path().join("app").join("shared").join("config");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn path_helpers_are_pure_and_stable() {
        let paths = ResolverPaths::with_dirs(PathBuf::from("/opt/rabital"), None);
        assert_eq!(paths.shared_dir(), PathBuf::from("/opt/rabital/shared"));
        assert_eq!(paths.themes_dir(), PathBuf::from("/opt/rabital/shared/themes"));
        assert_eq!(paths.config_dir(), PathBuf::from("/opt/rabital/shared/config"));
        // Repeated calls compose the same paths
        assert_eq!(paths.shared_dir(), paths.shared_dir());
        assert_eq!(paths.project_dir(), None);
    }

    #[test]
    fn no_workspace_no_global_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = ResolverPaths::with_dirs(temp.path().join("app"), None);

        let resolved = ResolvedConfig::resolve(&paths);
        assert_eq!(resolved.settings.editor.theme, "dark");
        assert!(resolved.tasks.is_none());
        assert!(resolved.debug.is_none());
        assert!(resolved.diagnostics.is_empty());
    }

    #[test]
    fn workspace_without_project_dir_uses_global() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("workspace")).unwrap();
        write_global_file(&temp, GLOBAL_SETTINGS_FILE, "editor:\n  theme: greyscale\n");

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        assert_eq!(resolved.settings.editor.theme, "greyscale");
        // Non-overridden fields come from defaults
        assert_eq!(resolved.settings.editor.font_size, 14);
    }

    #[test]
    fn valid_project_file_shadows_global_entirely() {
        let temp = TempDir::new().unwrap();
        write_global_file(&temp, GLOBAL_SETTINGS_FILE, "editor:\n  theme: greyscale\n  font_size: 18\n");
        write_project_file(&temp, SETTINGS_FILE, "editor:\n  theme: sun\n");

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        // Project wins for theme regardless of global content
        assert_eq!(resolved.settings.editor.theme, "sun");
        // Global is not consulted once the project document resolves; fields
        // the project omits come from built-in defaults
        assert_eq!(resolved.settings.editor.font_size, 14);
    }

    #[test]
    fn malformed_project_settings_fall_back_to_global() {
        let temp = TempDir::new().unwrap();
        write_global_file(&temp, GLOBAL_SETTINGS_FILE, "editor:\n  theme: greyscale\n");
        write_project_file(&temp, SETTINGS_FILE, "editor: [not: valid: yaml\n");

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        assert_eq!(resolved.settings.editor.theme, "greyscale");
        assert_eq!(resolved.diagnostics.len(), 1);
        assert_eq!(resolved.diagnostics[0].tier, ConfigTier::Project);
    }

    #[test]
    fn mistyped_project_field_falls_back_to_global() {
        let temp = TempDir::new().unwrap();
        write_global_file(&temp, GLOBAL_SETTINGS_FILE, "editor:\n  theme: greyscale\n");
        // Parses as YAML but font_size cannot deserialize into u32
        write_project_file(&temp, SETTINGS_FILE, "editor:\n  font_size: huge\n");

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        assert_eq!(resolved.settings.editor.theme, "greyscale");
        // The shape failure is attributed to the offending file
        let diagnostic = resolved
            .diagnostics
            .iter()
            .find(|d| d.tier == ConfigTier::Project)
            .expect("project tier should be diagnosed");
        assert!(diagnostic.path.ends_with(SETTINGS_FILE));
        assert!(diagnostic.message.contains("invalid configuration shape"));
    }

    #[test]
    fn malformed_tasks_do_not_affect_settings_or_debug() {
        let temp = TempDir::new().unwrap();
        write_project_file(&temp, SETTINGS_FILE, "editor:\n  theme: sun\n");
        write_project_file(&temp, TASKS_FILE, "version: [broken\n");
        write_project_file(
            &temp,
            DEBUG_FILE,
            "version: \"1.0\"\nconfigurations:\n  - name: launch\n    type: lldb\n    request: launch\n    program: app\n",
        );

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        assert_eq!(resolved.settings.editor.theme, "sun");
        assert!(resolved.tasks.is_none());
        let debug = resolved.debug.expect("debug config should resolve");
        assert_eq!(debug.configurations[0].name, "launch");
        assert_eq!(resolved.diagnostics.len(), 1);
    }

    #[test]
    fn project_tasks_win_over_global_tasks() {
        let temp = TempDir::new().unwrap();
        write_global_file(
            &temp,
            TASKS_FILE,
            "version: \"1.0\"\ntasks:\n  - name: global-build\n    type: shell\n    command: make\n",
        );
        write_project_file(
            &temp,
            TASKS_FILE,
            "version: \"1.0\"\ntasks:\n  - name: project-build\n    type: shell\n    command: cargo\n",
        );

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        let tasks = resolved.tasks.expect("tasks should resolve");
        assert_eq!(tasks.tasks[0].name, "project-build");
    }

    #[test]
    fn global_tasks_used_when_project_has_none() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("workspace")).unwrap();
        write_global_file(
            &temp,
            TASKS_FILE,
            "version: \"1.0\"\ntasks:\n  - name: global-build\n    type: shell\n    command: make\n",
        );

        let resolved = ResolvedConfig::resolve(&paths_in(&temp));
        let tasks = resolved.tasks.expect("tasks should resolve");
        assert_eq!(tasks.tasks[0].name, "global-build");
    }
}
