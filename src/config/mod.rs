//! Layered workspace configuration.
//!
//! Resolves the three workspace documents from up to three tiers, highest
//! priority first:
//! 1. **Project** - `<workspace>/.rabital/` (`settings.yml`, `tasks.yml`, `debug.yml`)
//! 2. **Global** - `{appdir}/shared/config/` (`setting.yml`, `tasks.yml`, `debug.yml`)
//! 3. **Defaults** - built in; resolution always yields usable settings
//!
//! ## Resolution strategy
//! Each document resolves whole-document, first-found-wins from the highest
//! tier. Fields a settings document omits fall back to built-in defaults,
//! never to a lower document tier.
//!
//! Themes live under `{appdir}/shared/themes/` and are loaded as opaque
//! strings.
//!
//! ## Environment variables
//! - `RABITAL_APP_DIR` - application directory (default: executable's directory)
//! - `RABITAL_WORKSPACE` - initial workspace

pub mod loader;
pub mod merge;
pub mod store;
pub mod themes;
pub mod types;
pub mod watcher;

pub use loader::{
    ConfigDiagnostic, ConfigTier, PROJECT_DIR_NAME, ResolvedConfig, ResolverPaths,
};
pub use merge::deep_merge;
pub use store::ConfigStore;
pub use themes::{ThemeFile, find_theme, list_themes, load_theme};
pub use types::*;
