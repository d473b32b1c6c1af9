//! Theme discovery and loading from the shared themes directory.
//!
//! Themes are YAML documents under `{appdir}/shared/themes/`; this module
//! treats their content as opaque strings. A missing theme is a normal
//! condition, the caller decides the fallback.

use super::loader::ResolverPaths;
use std::path::PathBuf;
use tracing::warn;

/// A theme file found on disk.
#[derive(Debug, Clone)]
pub struct ThemeFile {
    /// Name without extension, as used in `editor.theme`.
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}

/// Extensions recognized as theme documents.
const THEME_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// List theme names discovered in the shared themes directory, sorted.
///
/// An unreadable or missing directory yields an empty list.
pub fn list_themes(paths: &ResolverPaths) -> Vec<String> {
    let themes_dir = paths.themes_dir();
    let mut themes = Vec::new();

    if let Ok(entries) = std::fs::read_dir(&themes_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_theme = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| THEME_EXTENSIONS.contains(&ext));
            if is_theme
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                themes.push(stem.to_string());
            }
        }
    }

    themes.sort();
    themes.dedup();
    themes
}

/// Load a theme's content by name, or `None` if no matching file exists.
pub fn load_theme(paths: &ResolverPaths, name: &str) -> Option<String> {
    find_theme(paths, name).map(|theme| theme.content)
}

/// Locate and read a theme file, trying each recognized extension.
pub fn find_theme(paths: &ResolverPaths, name: &str) -> Option<ThemeFile> {
    let themes_dir = paths.themes_dir();

    for ext in THEME_EXTENSIONS {
        let path = themes_dir.join(format!("{name}.{ext}"));
        if !path.is_file() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                return Some(ThemeFile {
                    name: name.to_string(),
                    path,
                    content,
                });
            }
            Err(err) => {
                warn!("failed to read theme {}: {err}", path.display());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn theme_fixture(temp: &TempDir) -> ResolverPaths {
        let themes_dir = temp.path().join("shared").join("themes");
        std::fs::create_dir_all(&themes_dir).unwrap();
        ResolverPaths::with_dirs(temp.path().to_path_buf(), None)
    }

    #[test]
    fn lists_theme_names_without_extension() {
        let temp = TempDir::new().unwrap();
        let paths = theme_fixture(&temp);
        let dir = paths.themes_dir();
        std::fs::write(dir.join("default.yml"), "colors: {}").unwrap();
        std::fs::write(dir.join("sun.yml"), "colors: {}").unwrap();
        std::fs::write(dir.join("greyscale.yml"), "colors: {}").unwrap();
        std::fs::write(dir.join("notes.txt"), "not a theme").unwrap();

        let themes = list_themes(&paths);
        assert_eq!(themes, vec!["default", "greyscale", "sun"]);
    }

    #[test]
    fn missing_themes_dir_lists_nothing() {
        let paths = ResolverPaths::with_dirs(PathBuf::from("/nonexistent-rabital"), None);
        assert!(list_themes(&paths).is_empty());
    }

    #[test]
    fn loads_theme_content_verbatim() {
        let temp = TempDir::new().unwrap();
        let paths = theme_fixture(&temp);
        let content = "colors:\n  background: \"#1e1e1e\"\n";
        std::fs::write(paths.themes_dir().join("default.yml"), content).unwrap();

        assert_eq!(load_theme(&paths, "default").as_deref(), Some(content));
    }

    #[test]
    fn missing_theme_is_none() {
        let temp = TempDir::new().unwrap();
        let paths = theme_fixture(&temp);
        assert!(load_theme(&paths, "nonexistent-theme").is_none());
    }

    #[test]
    fn yaml_extension_also_recognized() {
        let temp = TempDir::new().unwrap();
        let paths = theme_fixture(&temp);
        std::fs::write(paths.themes_dir().join("sun.yaml"), "colors: {}").unwrap();

        let theme = find_theme(&paths, "sun").unwrap();
        assert_eq!(theme.name, "sun");
        assert!(theme.path.ends_with("sun.yaml"));
    }
}
