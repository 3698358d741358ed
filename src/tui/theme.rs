//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Cyan: focus and selection (highlighted menu, submenu cursor)
//! - Green: clean working tree
//! - Yellow: uncommitted changes
//! - Red: repository errors, backend failures
//! - Dim: borders and chrome without focus

use ratatui::style::{Color, Modifier, Style};

use crate::types::RepoStatus;

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

pub const STYLE_CLEAN: Style = Style::new().fg(Color::Green);

pub const STYLE_MODIFIED: Style = Style::new().fg(Color::Yellow);

pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// De-emphasized chrome: unfocused borders, hints.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Menu title or focused border.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Border of the pane that currently receives keys.
pub const STYLE_FOCUSED_BORDER: Style = Style::new().fg(Color::Cyan);

/// Selected menu title or list row.
pub const STYLE_SELECTED: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

/// Text cursor inside an input field.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Focused dialog button.
pub const STYLE_BUTTON_FOCUSED: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const STYLE_BUTTON: Style = Style::new().fg(Color::White);

/// Scrollbar thumb.
pub const STYLE_THUMB: Style = Style::new().fg(Color::Cyan);

/// Status band background.
pub const STYLE_STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

/// Colour for a repository status indicator.
pub fn status_style(status: &RepoStatus) -> Style {
    match status {
        RepoStatus::Clean => STYLE_CLEAN,
        RepoStatus::Modified => STYLE_MODIFIED,
        RepoStatus::Error => STYLE_ERROR,
    }
}

// ============================================================================
// TESTS
// ============================================================================
