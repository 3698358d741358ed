//! Repository discovery.
//!
//! Finds the working tree gitnav should operate on. Not being inside a
//! repository is a valid state (git commands will simply report errors
//! into the output pane); only a start path that does not exist or is not
//! a directory is an error.
//!
//! Structure:
//! - Constants: path components git relies on
//! - Types: discovery outcome (sum type) and errors
//! - Pure functions: ancestor search over a caller-supplied predicate
//! - Effect functions: filesystem discovery

use std::path::{Path, PathBuf};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Marker git places at the root of a working tree.
///
/// A directory for normal clones, a file for linked worktrees and
/// submodules. Either counts.
pub const GIT_MARKER: &str = ".git";

// ============================================================================
// TYPES
// ============================================================================

/// What discovery found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoLocation {
    /// A working tree root was found at or above the start directory.
    Found { root: PathBuf },
    /// No `.git` marker anywhere above the start directory.
    NotARepository { searched_from: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Start path does not exist.
    NotFound { path: PathBuf },
    /// Start path exists but is not a directory.
    NotADirectory { path: PathBuf },
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Walk `start` and its ancestors, returning the first one `is_root` accepts.
pub fn find_root_with(start: &Path, is_root: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_root(dir))
        .map(Path::to_path_buf)
}

impl RepoLocation {
    /// Directory git commands should run in.
    pub fn work_dir(&self) -> &Path {
        match self {
            RepoLocation::Found { root } => root,
            RepoLocation::NotARepository { searched_from } => searched_from,
        }
    }
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Locate the repository containing `start`.
pub fn locate_repository(start: &Path) -> Result<RepoLocation, RepoError> {
    if !start.exists() {
        return Err(RepoError::NotFound {
            path: start.to_path_buf(),
        });
    }
    if !start.is_dir() {
        return Err(RepoError::NotADirectory {
            path: start.to_path_buf(),
        });
    }

    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    match find_root_with(&start, |dir| dir.join(GIT_MARKER).exists()) {
        Some(root) => Ok(RepoLocation::Found { root }),
        None => Ok(RepoLocation::NotARepository {
            searched_from: start,
        }),
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl std::fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoLocation::Found { root } => write!(f, "repository at {}", root.display()),
            RepoLocation::NotARepository { searched_from } => write!(
                f,
                "not a git repository (searched from {})",
                searched_from.display()
            ),
        }
    }
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::NotFound { path } => {
                write!(f, "Directory does not exist: {}", path.display())
            }
            RepoError::NotADirectory { path } => {
                write!(f, "Expected directory, found file: {}", path.display())
            }
        }
    }
}

impl std::error::Error for RepoError {}

// ============================================================================
// TESTS
// ============================================================================
