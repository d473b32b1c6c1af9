//! Configuration document types.
//!
//! Schemas for the three workspace documents (`settings.yml`, `tasks.yml`,
//! `debug.yml`). Every settings field carries a serde default so a partial
//! document at any tier deserializes cleanly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Effective editor settings, merged across tiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorConfig,

    /// Per-language overrides, keyed by language id (e.g. "rust", "python").
    #[serde(default)]
    pub languages: HashMap<String, LanguageConfig>,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub terminal: TerminalConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub search: SearchConfig,

    /// Sections this crate does not model. Preserved so newer editors can
    /// round-trip configuration written by older ones.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The `editor` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_line_height")]
    pub line_height: f32,

    #[serde(default = "default_tab_size")]
    pub tab_size: u32,

    /// Insert spaces instead of tab characters.
    #[serde(default = "default_true")]
    pub insert_spaces: bool,

    #[serde(default)]
    pub auto_save: bool,

    /// Delay before auto-save fires, in milliseconds.
    #[serde(default = "default_auto_save_delay")]
    pub auto_save_delay: u32,

    #[serde(default)]
    pub word_wrap: bool,

    #[serde(default = "default_true")]
    pub show_line_numbers: bool,

    #[serde(default)]
    pub show_minimap: bool,

    #[serde(default = "default_true")]
    pub highlight_current_line: bool,

    #[serde(default)]
    pub format_on_save: bool,

    #[serde(default)]
    pub trim_trailing_whitespace: bool,

    #[serde(default)]
    pub insert_final_newline: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            tab_size: default_tab_size(),
            insert_spaces: true,
            auto_save: false,
            auto_save_delay: default_auto_save_delay(),
            word_wrap: false,
            show_line_numbers: true,
            show_minimap: false,
            highlight_current_line: true,
            format_on_save: false,
            trim_trailing_whitespace: false,
            insert_final_newline: false,
        }
    }
}

/// Per-language settings override.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageConfig {
    #[serde(default = "default_tab_size")]
    pub tab_size: u32,

    #[serde(default)]
    pub format_on_save: bool,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            format_on_save: false,
        }
    }
}

/// The `explorer` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplorerConfig {
    /// Glob patterns hidden from the file tree.
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub show_hidden_files: bool,

    #[serde(default = "default_true")]
    pub sort_folders_first: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: default_exclude_patterns(),
            show_hidden_files: false,
            sort_folders_first: true,
        }
    }
}

/// The `terminal` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerminalConfig {
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_terminal_font_size")]
    pub font_size: u32,

    #[serde(default = "default_true")]
    pub cursor_blink: bool,

    /// Scrollback buffer size in lines.
    #[serde(default = "default_scrollback")]
    pub scrollback: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            font_size: default_terminal_font_size(),
            cursor_blink: true,
            scrollback: default_scrollback(),
        }
    }
}

/// The `git` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub auto_fetch: bool,

    #[serde(default)]
    pub show_inline_blame: bool,

    #[serde(default = "default_true")]
    pub show_gutter_indicators: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            auto_fetch: false,
            show_inline_blame: false,
            show_gutter_indicators: true,
        }
    }
}

/// The `search` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default)]
    pub whole_word: bool,

    #[serde(default)]
    pub use_regex: bool,

    #[serde(default = "default_search_excludes")]
    pub exclude_patterns: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            use_regex: false,
            exclude_patterns: default_search_excludes(),
        }
    }
}

/// Workspace task definitions from `tasks.yml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasksConfig {
    pub version: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A single named build/test/run command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub group: String,
}

/// Debugger launch configurations from `debug.yml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugConfig {
    pub version: String,
    #[serde(default)]
    pub configurations: Vec<DebugConfiguration>,
}

/// A single debugger launch entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebugConfiguration {
    pub name: String,
    #[serde(rename = "type")]
    pub debug_type: String,
    pub request: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_font_family() -> String {
    "Cascadia Code".to_string()
}

fn default_font_size() -> u32 {
    14
}

fn default_line_height() -> f32 {
    1.5
}

fn default_tab_size() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

fn default_auto_save_delay() -> u32 {
    1000
}

fn default_shell() -> String {
    if cfg!(windows) {
        "powershell.exe".to_string()
    } else {
        "/bin/sh".to_string()
    }
}

fn default_terminal_font_size() -> u32 {
    13
}

fn default_scrollback() -> u32 {
    10_000
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "build/**".to_string(),
        "target/**".to_string(),
        "node_modules/**".to_string(),
        ".git/**".to_string(),
    ]
}

fn default_search_excludes() -> Vec<String> {
    vec![
        "build/**".to_string(),
        "target/**".to_string(),
        "node_modules/**".to_string(),
    ]
}
