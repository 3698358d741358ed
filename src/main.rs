//! gitnav CLI
//!
//! Menu-driven terminal front end for everyday git commands.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use gitnav::backend::GitCli;
use gitnav::config::load_config;
use gitnav::repo::{locate_repository, RepoLocation};
use gitnav::tui;

const LOG_FILENAME: &str = "gitnav.log";

#[derive(Parser)]
#[command(name = "gitnav")]
#[command(about = "Navigate git through menus, dialogs and a scrollable output pane")]
#[command(version)]
struct Cli {
    /// Repository directory (default: current directory)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Menu and help configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug detail
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref(), cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let start = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| format!("Cannot read current directory: {}", e))?,
    };

    let location = locate_repository(&start).map_err(|e| e.to_string())?;
    match &location {
        RepoLocation::Found { .. } => info!("Using {}", location),
        RepoLocation::NotARepository { .. } => warn!("{}", location),
    }

    let config = load_config(cli.config.as_deref());
    let backend = GitCli::new(location.work_dir());

    tui::run::run(config, &backend).map_err(|e| format!("Terminal error: {}", e))?;
    info!("gitnav exiting");
    Ok(())
}

// ============================================================================
// LOGGING
// ============================================================================

/// Default log location: `<data_dir>/gitnav/gitnav.log`.
fn default_log_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("gitnav").join(LOG_FILENAME))
}

/// Log to a file; the terminal belongs to the TUI. Failure is not fatal.
fn init_logging(explicit: Option<&Path>, verbose: bool) {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
