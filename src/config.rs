//! Loading the menu tree and help text.
//!
//! Configuration is a single JSON document (see `config/default.json`).
//! Loading never fails startup: a missing or malformed file yields an empty
//! menu tree, and the UI degrades to free-text command entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::types::UiConfig;

/// Config filename within the gitnav config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Built-in document used when no config file has been installed.
const BUILTIN_CONFIG: &str = include_str!("../config/default.json");

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The file was read but is not a valid config document.
    Parse { path: PathBuf, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "Invalid config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { .. } => None,
        }
    }
}

// ============================================================================
// PATHS
// ============================================================================

/// Returns the default config location.
///
/// On Linux: ~/.config/gitnav/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gitnav")
        .join(CONFIG_FILENAME)
}

// ============================================================================
// LOADING
// ============================================================================

/// Parse a config document from text.
pub fn parse_config(text: &str, path: &Path) -> Result<UiConfig, ConfigError> {
    serde_json::from_str(text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<UiConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, path)
}

/// The menu tree and help text shipped with the binary.
pub fn builtin_config() -> UiConfig {
    parse_config(BUILTIN_CONFIG, Path::new("<built-in>")).unwrap_or_else(|e| {
        warn!("{}", e);
        UiConfig::default()
    })
}

/// Resolve the configuration for this run.
///
/// - An explicit path is read as-is; any failure gives an empty tree.
/// - Otherwise the default path is used if it exists (same failure rule).
/// - With no file installed, the built-in document is used.
pub fn load_config(explicit: Option<&Path>) -> UiConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_config_path();
            if !path.exists() {
                info!("No config at {}, using built-in menus", path.display());
                return builtin_config();
            }
            path
        }
    };

    match read_config(&path) {
        Ok(config) => {
            info!(
                "Loaded {} menus and {} help sections from {}",
                config.menus.len(),
                config.help.len(),
                path.display()
            );
            config
        }
        Err(e) => {
            warn!("{}; starting with an empty menu tree", e);
            UiConfig::default()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_config_has_standard_menu_tree() {
        let config = builtin_config();
        let names: Vec<&str> = config.menus.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["File", "Branch", "Git", "Help"]);

        let git = &config.menus[2];
        let switch = git.items.iter().find(|i| i.label == "Switch Branch").unwrap();
        assert_eq!(switch.command, "checkout");
        assert_eq!(switch.description, "Switch to another branch");
        assert!(!config.help.is_empty());
    }

    #[test]
    fn every_builtin_item_has_a_description() {
        for menu in builtin_config().menus {
            for item in menu.items {
                assert!(!item.description.is_empty(), "{} lacks a description", item.label);
                assert!(!item.command.is_empty(), "{} lacks a command", item.label);
            }
        }
    }

    #[test]
    fn explicit_missing_file_gives_empty_tree() {
        let temp = TempDir::new().unwrap();
        let config = load_config(Some(&temp.path().join("missing.json")));
        assert!(config.menus.is_empty());
    }

    #[test]
    fn explicit_malformed_file_gives_empty_tree() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ this is not json").unwrap();
        let config = load_config(Some(&path));
        assert!(config.menus.is_empty());
        assert!(config.help.is_empty());
    }

    #[test]
    fn explicit_valid_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("menus.json");
        fs::write(
            &path,
            r#"{"menus": [{"name": "Repo", "items": [{"label": "Status", "command": "status"}]}]}"#,
        )
        .unwrap();
        let config = load_config(Some(&path));
        assert_eq!(config.menus.len(), 1);
        assert_eq!(config.menus[0].items[0].command, "status");
        assert!(config.help.is_empty());
    }

    #[test]
    fn read_errors_name_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.json");
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = parse_config("[1, 2]", Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("gitnav/config.json"));
    }
}
