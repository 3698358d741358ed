//! The command table: which command keys need special handling.
//!
//! Menu items and typed command lines carry an opaque command string.
//! Most go straight to the backend. A closed set of keys is routed
//! differently: they quit, show help, or need a parameter from the user
//! before anything runs. [`CommandId::route`] is an exhaustive match, so
//! adding a command forces a decision about how it is handled.

/// A command that is not simply passed through to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    Exit,
    Help,
    Commit,
    CreateBranch,
    RenameBranch,
    DeleteBranch,
    CheckoutRemote,
    MergeBranch,
    SwitchBranch,
    SetRemoteUrl,
}

/// Normalized command key → identifier.
const COMMAND_KEYS: &[(&str, CommandId)] = &[
    ("exit", CommandId::Exit),
    ("quit", CommandId::Exit),
    ("help", CommandId::Help),
    ("commit", CommandId::Commit),
    ("checkout -b", CommandId::CreateBranch),
    ("branch -m", CommandId::RenameBranch),
    ("branch -d", CommandId::DeleteBranch),
    ("checkout --track", CommandId::CheckoutRemote),
    ("merge", CommandId::MergeBranch),
    ("checkout", CommandId::SwitchBranch),
    ("remote set-url origin", CommandId::SetRemoteUrl),
];

/// Verbs after which the local branch list may have changed.
const BRANCH_CHANGING_VERBS: &[&str] = &["checkout", "switch", "branch", "merge"];

/// Text for the dialog that collects a command's missing parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub prompt: &'static str,
}

/// How the dispatcher handles a command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Leave the application.
    Quit,
    /// Show the configured help text; the backend is not called.
    ShowHelp,
    /// Ask for a parameter, then run `<command> <answer>`.
    Ask(Prompt),
    /// Hand the command line to the backend as-is.
    Run,
}

impl CommandId {
    /// Look up a command string, ignoring case and repeated spaces.
    pub fn lookup(command: &str) -> Option<CommandId> {
        let normalized = normalize(command);
        COMMAND_KEYS
            .iter()
            .find(|(key, _)| *key == normalized)
            .map(|(_, id)| *id)
    }

    pub fn route(self) -> Route {
        match self {
            CommandId::Exit => Route::Quit,
            CommandId::Help => Route::ShowHelp,
            CommandId::Commit => Route::Ask(Prompt {
                title: "Commit Message",
                prompt: "Please provide a commit message:",
            }),
            CommandId::CreateBranch => Route::Ask(Prompt {
                title: "Create Branch",
                prompt: "Name of the new branch:",
            }),
            CommandId::RenameBranch => Route::Ask(Prompt {
                title: "Rename Branch",
                prompt: "New name for the current branch:",
            }),
            CommandId::DeleteBranch => Route::Ask(Prompt {
                title: "Delete Branch",
                prompt: "Local branch to delete:",
            }),
            CommandId::CheckoutRemote => Route::Ask(Prompt {
                title: "Checkout Remote",
                prompt: "Remote branch (e.g. origin/feature):",
            }),
            CommandId::MergeBranch => Route::Ask(Prompt {
                title: "Merge Branch",
                prompt: "Branch to merge into the current one:",
            }),
            CommandId::SwitchBranch => Route::Ask(Prompt {
                title: "Switch Branch",
                prompt: "Branch to switch to:",
            }),
            CommandId::SetRemoteUrl => Route::Ask(Prompt {
                title: "Remote URL",
                prompt: "New URL for origin:",
            }),
        }
    }
}

/// Route any command string. Unknown strings run as-is.
pub fn route(command: &str) -> Route {
    CommandId::lookup(command).map_or(Route::Run, CommandId::route)
}

/// Append a user-supplied or menu-supplied argument to a command key.
pub fn with_argument(command: &str, argument: &str) -> String {
    format!("{} {}", command.trim(), argument.trim())
}

/// True if running `command_line` may add, remove or rename local branches.
pub fn changes_branch_list(command_line: &str) -> bool {
    command_line
        .split_whitespace()
        .next()
        .is_some_and(|verb| {
            BRANCH_CHANGING_VERBS
                .iter()
                .any(|v| verb.eq_ignore_ascii_case(v))
        })
}

fn normalize(command: &str) -> String {
    command
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_and_help_are_local() {
        assert_eq!(route("exit"), Route::Quit);
        assert_eq!(route("EXIT"), Route::Quit);
        assert_eq!(route("help"), Route::ShowHelp);
    }

    #[test]
    fn commit_asks_for_a_message() {
        match route("commit") {
            Route::Ask(prompt) => {
                assert_eq!(prompt.title, "Commit Message");
                assert_eq!(prompt.prompt, "Please provide a commit message:");
            }
            other => panic!("Expected Ask, got {:?}", other),
        }
    }

    #[test]
    fn lookup_ignores_spacing_and_case() {
        assert_eq!(CommandId::lookup("  Checkout   -B "), Some(CommandId::CreateBranch));
        assert_eq!(CommandId::lookup("remote  set-url origin"), Some(CommandId::SetRemoteUrl));
    }

    #[test]
    fn commands_with_arguments_run_directly() {
        assert_eq!(route("checkout dev"), Route::Run);
        assert_eq!(route("commit fix bug"), Route::Run);
        assert_eq!(route("status"), Route::Run);
        assert_eq!(route("stash pop"), Route::Run);
    }

    #[test]
    fn every_table_key_routes_to_its_id() {
        for (key, id) in COMMAND_KEYS {
            assert_eq!(CommandId::lookup(key), Some(*id));
        }
    }

    #[test]
    fn with_argument_joins_with_single_space() {
        assert_eq!(with_argument("checkout", "dev"), "checkout dev");
        assert_eq!(with_argument("commit ", " fix bug "), "commit fix bug");
    }

    #[test]
    fn branch_changing_commands_are_detected() {
        assert!(changes_branch_list("checkout dev"));
        assert!(changes_branch_list("checkout -b feature"));
        assert!(changes_branch_list("Branch -d old"));
        assert!(changes_branch_list("switch main"));
        assert!(changes_branch_list("merge dev"));
        assert!(!changes_branch_list("status"));
        assert!(!changes_branch_list(""));
    }
}
