//! The git backend: turns command lines into git invocations and text.
//!
//! The UI only sees the [`GitBackend`] trait. Every method returns plain
//! values; failures are folded into text or sentinel values here so that
//! nothing a backend does can abort the event loop.
//!
//! Structure:
//! - Pure functions: command line → [`Invocation`], output formatting
//! - Effect functions: [`GitCli`] runs `git` as a child process

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::types::{DETACHED_HEAD, RepoStatus, UNKNOWN_BRANCH};

/// Remote used by bare `push` / `pull`.
pub const DEFAULT_REMOTE: &str = "origin";

/// Shown when a command succeeds without printing anything.
const NO_OUTPUT: &str = "(no output)";

// ============================================================================
// TRAIT
// ============================================================================

/// What the UI needs from a version-control backend.
///
/// All calls are synchronous. A slow backend blocks the UI for the
/// duration of the call.
pub trait GitBackend {
    /// Run a command line and return human-readable output (never fails).
    fn execute_command(&self, command_line: &str) -> String;
    /// Local branch names, in git's order. Empty on failure.
    fn local_branches(&self) -> Vec<String>;
    /// Current branch, or [`DETACHED_HEAD`] / [`UNKNOWN_BRANCH`].
    fn current_branch(&self) -> String;
    fn repository_status(&self) -> RepoStatus;
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug)]
pub enum BackendError {
    /// The git executable could not be started.
    Spawn { program: String, source: io::Error },
    /// git ran and exited unsuccessfully.
    Failed { code: Option<i32>, output: String },
    /// The command line could not be turned into an invocation.
    Invalid(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Spawn { program, source } => {
                write!(f, "could not run {}: {}", program, source)
            }
            BackendError::Failed { code, output } => {
                match code {
                    Some(code) => write!(f, "git exited with status {}", code)?,
                    None => write!(f, "git was terminated by a signal")?,
                }
                if !output.trim().is_empty() {
                    write!(f, "\n{}", output.trim_end())?;
                }
                Ok(())
            }
            BackendError::Invalid(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// PURE FUNCTIONS (Command Planning)
// ============================================================================

/// A planned git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments after `git`.
    pub args: Vec<String>,
    /// Replacement text when git succeeds silently.
    pub quiet_message: Option<&'static str>,
}

impl Invocation {
    fn plain(args: Vec<String>) -> Self {
        Invocation {
            args,
            quiet_message: None,
        }
    }

    fn with_quiet(args: Vec<&str>, message: &'static str) -> Self {
        Invocation {
            args: args.into_iter().map(str::to_string).collect(),
            quiet_message: Some(message),
        }
    }

    /// The invocation as the user would type it, for the output header.
    pub fn display(&self) -> String {
        let mut out = String::from("git");
        for arg in &self.args {
            out.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                out.push('"');
                out.push_str(&arg.replace('"', "\\\""));
                out.push('"');
            } else {
                out.push_str(arg);
            }
        }
        out
    }
}

/// Turn a dispatcher command line into git arguments.
///
/// - `add` stages everything.
/// - `commit <message>` commits with that message. The rest of the line is
///   one argument even when it starts with `-`; an explicit `-m` or
///   `--message` prefix is dropped (with one pair of surrounding quotes).
/// - bare `push` / `pull` target [`DEFAULT_REMOTE`].
/// - a bare local branch name checks that branch out.
/// - anything else is split on whitespace.
pub fn plan_invocation(command_line: &str, local_branches: &[String]) -> Result<Invocation, BackendError> {
    let line = command_line.trim();
    if line.is_empty() {
        return Err(BackendError::Invalid("no command given".to_string()));
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let invocation = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("add", "") => Invocation::with_quiet(vec!["add", "."], "Files added successfully."),
        ("commit", "") => {
            return Err(BackendError::Invalid(
                "Commit message cannot be empty.".to_string(),
            ));
        }
        ("commit", rest) => {
            let message = commit_message(rest);
            if message.is_empty() {
                return Err(BackendError::Invalid(
                    "Commit message cannot be empty.".to_string(),
                ));
            }
            Invocation::with_quiet(vec!["commit", "-m", message], "No changes to commit.")
        }
        ("push", "") => Invocation::with_quiet(vec!["push", DEFAULT_REMOTE], "No changes to push."),
        ("pull", "") => Invocation::with_quiet(vec!["pull", DEFAULT_REMOTE], "No changes to pull."),
        (_, "") if local_branches.iter().any(|b| b == verb) => {
            Invocation::plain(vec!["checkout".to_string(), verb.to_string()])
        }
        _ => Invocation::plain(line.split_whitespace().map(str::to_string).collect()),
    };
    Ok(invocation)
}

/// Message text of `commit <rest>`.
fn commit_message(rest: &str) -> &str {
    let flagged = ["--message", "-m"].iter().find_map(|flag| {
        let after = rest.strip_prefix(flag)?;
        (after.is_empty() || after.starts_with(char::is_whitespace)).then(|| after.trim())
    });
    let Some(flagged) = flagged else {
        return rest;
    };
    ['"', '\'']
        .iter()
        .find_map(|q| flagged.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(flagged)
}

/// Format a command result for the output pane: `$ <command>`, blank line, body.
pub fn format_result(invocation: &Invocation, result: Result<String, BackendError>) -> String {
    let body = match result {
        Ok(output) if output.trim().is_empty() => invocation
            .quiet_message
            .unwrap_or(NO_OUTPUT)
            .to_string(),
        Ok(output) => output,
        Err(e) => format!("Error: {}", e),
    };
    let mut text = format!("$ {}\n\n{}", invocation.display(), body);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Split `git branch --format` output into names.
pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// EFFECT FUNCTIONS (git child processes)
// ============================================================================

/// Backend that runs the `git` executable in a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    work_dir: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(work_dir: &Path) -> Self {
        Self::with_program(work_dir, "git")
    }

    /// Use a different executable (tests, wrappers).
    pub fn with_program(work_dir: &Path, program: &str) -> Self {
        GitCli {
            work_dir: work_dir.to_path_buf(),
            program: program.to_string(),
        }
    }

    /// A git child process for this repository.
    ///
    /// The TUI owns the terminal, so git must never prompt on it for
    /// credentials; a remote that needs them fails with error text instead.
    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .current_dir(&self.work_dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        command
    }

    /// Run git and return stdout followed by stderr.
    ///
    /// git reports many successful operations (checkout, push) on stderr,
    /// so both streams are kept.
    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String, BackendError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!("{} {}", self.program, args.join(" "));

        let output = self
            .command()
            .args(&args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        if output.status.success() {
            Ok(text)
        } else {
            Err(BackendError::Failed {
                code: output.status.code(),
                output: text,
            })
        }
    }

    /// Run git and return only stdout, for machine-readable queries.
    fn query(&self, args: &[&str]) -> Result<String, BackendError> {
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|source| BackendError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(BackendError::Failed {
                code: output.status.code(),
                output: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

impl GitBackend for GitCli {
    fn execute_command(&self, command_line: &str) -> String {
        let branches = self.local_branches();
        match plan_invocation(command_line, &branches) {
            Ok(invocation) => {
                let result = self.run(&invocation.args);
                if let Err(e) = &result {
                    warn!("{}: {}", invocation.display(), e);
                }
                format_result(&invocation, result)
            }
            Err(e) => format!("Error: {}\n", e),
        }
    }

    fn local_branches(&self) -> Vec<String> {
        match self.query(&["branch", "--format=%(refname:short)"]) {
            Ok(output) => parse_branch_list(&output),
            Err(e) => {
                debug!("branch listing failed: {}", e);
                Vec::new()
            }
        }
    }

    fn current_branch(&self) -> String {
        match self.query(&["branch", "--show-current"]) {
            Ok(output) => {
                let name = output.trim();
                if name.is_empty() {
                    DETACHED_HEAD.to_string()
                } else {
                    name.to_string()
                }
            }
            Err(_) => UNKNOWN_BRANCH.to_string(),
        }
    }

    fn repository_status(&self) -> RepoStatus {
        match self.query(&["status", "--porcelain"]) {
            Ok(output) if output.trim().is_empty() => RepoStatus::Clean,
            Ok(_) => RepoStatus::Modified,
            Err(_) => RepoStatus::Error,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
