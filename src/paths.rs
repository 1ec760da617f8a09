//! Centralized path definitions for isoaudit
//!
//! ## Storage Layout
//!
//! ### Per-Project (working directory)
//!
//! ```text
//! project/
//! ├── isoaudit.toml          # Project configuration
//! └── .isoaudit/             # Default data directory
//!     └── store.json         # NCRs, corrective actions, assessments
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/isoaudit/
//! └── config.toml            # Fallback configuration
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths
// =============================================================================

/// Project configuration filename
pub const PROJECT_CONFIG: &str = "isoaudit.toml";

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = ".isoaudit";

/// Store document filename inside the data directory
const STORE_FILE: &str = "store.json";

/// Get path to `isoaudit.toml` in the working directory.
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(PROJECT_CONFIG)
}

/// Get path to the store document inside `data_dir`.
#[must_use]
pub fn store_file(data_dir: &Path) -> PathBuf {
    data_dir.join(STORE_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "isoaudit";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global isoaudit directory.
///
/// Returns `~/.config/isoaudit/` on Linux, the platform config dir elsewhere.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
