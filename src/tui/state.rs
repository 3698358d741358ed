//! TUI state algebra: pure types, zero effects.
//!
//! These types define the whole navigation state space. Indices that only
//! mean something in one mode live inside that mode's variant, so a
//! dynamic-submenu index cannot exist while the menu bar is active.
//! The transition function and the rendering layer both program against
//! these types.

use std::collections::VecDeque;
use std::sync::mpsc;

use crossterm::event::KeyEvent;

use crate::menu::{MenuItem, MenuModel};
use crate::types::{HelpSection, StatusInfo, UiConfig};

use super::line_input::CommandHistory;
use super::viewport::{Scroll, Viewport};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive.
///
/// A key reader thread is the only producer. Resize arrives through the
/// same queue as keys, so it is ordered with respect to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// New terminal size in columns and rows.
    Resize(u16, u16),
}

/// Blocking source of events. The main loop and every nested prompt read
/// from the same source.
pub trait EventSource {
    /// Next event, or None once no more events can arrive.
    fn next_event(&mut self) -> Option<AppEvent>;
}

impl EventSource for mpsc::Receiver<AppEvent> {
    fn next_event(&mut self) -> Option<AppEvent> {
        self.recv().ok()
    }
}

/// Scripted events, drained front to back.
impl EventSource for VecDeque<AppEvent> {
    fn next_event(&mut self) -> Option<AppEvent> {
        self.pop_front()
    }
}

// ============================================================================
// NAVIGATION
// ============================================================================

/// Active interaction mode, with the indices valid only inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    MenuBar,
    /// Item list of the selected menu is open.
    Submenu { selected: usize },
    /// Dynamic items of item `selected` are open.
    DynamicSubmenu { selected: usize, dynamic: usize },
    /// Keys scroll the output pane.
    OutputFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigation {
    pub selected_menu: usize,
    pub mode: Mode,
    /// Consecutive `g` presses in OutputFocus. Two scroll to the top.
    pub pending_g: u8,
}

impl Navigation {
    pub fn menu_bar(selected_menu: usize) -> Self {
        Navigation {
            selected_menu,
            mode: Mode::MenuBar,
            pending_g: 0,
        }
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Navigation { mode, ..self }
    }

    /// Pull indices back inside the current menu tree.
    ///
    /// Modes whose indices no longer point at anything fall back one level
    /// (dynamic submenu → submenu → menu bar).
    pub fn reconciled(self, menus: &MenuModel) -> Self {
        if menus.is_empty() {
            let mode = match self.mode {
                Mode::OutputFocus => Mode::OutputFocus,
                _ => Mode::MenuBar,
            };
            return Navigation {
                selected_menu: 0,
                mode,
                ..self
            };
        }

        let selected_menu = self.selected_menu.min(menus.len() - 1);
        let item = |i: usize| menus.item(selected_menu, i);
        let mode = match self.mode {
            Mode::Submenu { selected } if item(selected).is_some() => self.mode,
            Mode::DynamicSubmenu { selected, dynamic } => match item(selected) {
                Some(it) if dynamic < it.dynamic_items().len() => self.mode,
                Some(_) => Mode::Submenu { selected },
                None => Mode::MenuBar,
            },
            Mode::Submenu { .. } => Mode::MenuBar,
            other => other,
        };
        Navigation {
            selected_menu,
            mode,
            ..self
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions independently of mode.
/// The transition function decides what each Action means per Mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Enter,
    /// Escape: step back one level.
    Back,
    /// Tab: switch between menu input and output scrolling.
    ToggleFocus,
    /// `i` / `I`: type a command.
    CommandEntry,
    /// `j`
    ScrollDown,
    /// `k`
    ScrollUp,
    /// `g`; two in a row jump to the top.
    TopPrefix,
    /// `G`
    Bottom,
    PageUp,
    PageDown,
    /// Ctrl+C
    Quit,
    /// Any key without a meaning of its own. Still breaks a `gg` sequence.
    Other,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Adopt this navigation state; nothing else happens.
    Navigate(Navigation),
    /// Adopt this navigation state, then carry out the effect.
    Effect(Navigation, Effect),
    Quit,
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run a command line through the dispatcher.
    Dispatch(String),
    /// Move the output pane.
    Scroll(Scroll),
    /// Read a free-text command line, then dispatch it.
    ReadCommandLine,
    /// Fetch the branch list into the dynamic items before a submenu opens.
    RefreshDynamicItems,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model, owned by the run loop.
#[derive(Debug)]
pub struct App {
    pub menus: MenuModel,
    pub help: Vec<HelpSection>,
    pub nav: Navigation,
    pub viewport: Viewport,
    pub status: StatusInfo,
    pub history: CommandHistory,
    /// Visible output rows at the last known terminal size.
    pub output_rows: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        App {
            menus: MenuModel::from_config(&config.menus),
            help: config.help,
            nav: Navigation::default(),
            viewport: Viewport::new(),
            status: StatusInfo::default(),
            history: CommandHistory::new(),
            output_rows: 0,
            should_quit: false,
        }
    }

    /// Item under the submenu cursor, if a submenu is open.
    pub fn highlighted_item(&self) -> Option<&MenuItem> {
        match self.nav.mode {
            Mode::Submenu { selected } | Mode::DynamicSubmenu { selected, .. } => {
                self.menus.item(self.nav.selected_menu, selected)
            }
            Mode::MenuBar | Mode::OutputFocus => None,
        }
    }

    /// Status-line description: the highlighted item's, or empty.
    pub fn description(&self) -> &str {
        self.highlighted_item()
            .map_or("", |item| item.description.as_str())
    }

    /// Record a new output height and reclamp everything that depends on it.
    pub fn resize(&mut self, output_rows: usize) {
        self.output_rows = output_rows;
        self.viewport.clamp(output_rows);
        self.nav = self.nav.reconciled(&self.menus);
    }

    /// Replace the output pane's content.
    pub fn show_output(&mut self, text: &str) {
        self.viewport.set_content(text, self.output_rows);
    }
}

// ============================================================================
// TESTS
// ============================================================================
