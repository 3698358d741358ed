//! Domain types for gitnav.
//!
//! Configuration records (as read from JSON) and the small closed
//! vocabularies the backend reports back to the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION RECORDS
// ============================================================================

/// One selectable entry in a menu, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuItemConfig {
    /// Text shown in the submenu.
    #[serde(default)]
    pub label: String,
    /// Opaque key handed to the dispatcher (usually a git subcommand).
    #[serde(default)]
    pub command: String,
    /// One-line text shown in the status band while highlighted.
    #[serde(default)]
    pub description: String,
}

/// A top-level menu and its items, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItemConfig>,
}

/// A titled block of help text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HelpSection {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub content: Vec<String>,
}

/// The whole configuration document: menu tree plus help sections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub menus: Vec<MenuConfig>,
    #[serde(default)]
    pub help: Vec<HelpSection>,
}

// ============================================================================
// REPOSITORY STATE
// ============================================================================

/// Branch name reported when HEAD is not on a branch.
pub const DETACHED_HEAD: &str = "detached HEAD";

/// Branch name reported when git could not be asked at all.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Working tree state shown on the right of the status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoStatus {
    /// Nothing to commit.
    Clean,
    /// Uncommitted or untracked changes present.
    Modified,
    /// git failed or this is not a repository.
    #[default]
    Error,
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RepoStatus::Clean => "Clean",
            RepoStatus::Modified => "Modified",
            RepoStatus::Error => "Error",
        };
        f.write_str(text)
    }
}

/// Snapshot of branch and working tree state, refreshed after each dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub branch: String,
    pub status: RepoStatus,
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            branch: UNKNOWN_BRANCH.to_string(),
            status: RepoStatus::Error,
        }
    }
}

/// Rendered as `"<branch> (<status>)"`.
impl fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.branch, self.status)
    }
}

// ============================================================================
// TESTS
// ============================================================================
