//! Pure state transitions: (Navigation, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each mode defines which actions it accepts. Unhandled actions return
//! the current navigation unchanged, apart from breaking a `gg` sequence.

use crate::commands::with_argument;
use crate::menu::MenuModel;

use super::state::{Action, Effect, Mode, Navigation, Transition};
use super::viewport::Scroll;

/// Pure state transition function.
///
/// Given the current navigation, an action, and a read-only view of the
/// menu tree, produces the next transition. The effects boundary
/// interprets the result.
pub fn update(nav: Navigation, action: &Action, menus: &MenuModel) -> Transition {
    if *action == Action::Quit {
        return Transition::Quit;
    }

    let pending_g = nav.pending_g;
    let nav = Navigation { pending_g: 0, ..nav };

    match nav.mode {
        Mode::MenuBar => update_menu_bar(nav, action, menus),
        Mode::Submenu { selected } => update_submenu(nav, selected, action, menus),
        Mode::DynamicSubmenu { selected, dynamic } => {
            update_dynamic_submenu(nav, selected, dynamic, action, menus)
        }
        Mode::OutputFocus => update_output_focus(nav, pending_g, action),
    }
}

// ============================================================================
// PER-MODE HANDLERS
// ============================================================================

/// MenuBar: pick a menu, open it, or leave for the output pane.
fn update_menu_bar(nav: Navigation, action: &Action, menus: &MenuModel) -> Transition {
    let count = menus.len();

    match action {
        Action::Left if count > 0 => Transition::Navigate(Navigation {
            selected_menu: wrap_prev(nav.selected_menu, count),
            ..nav
        }),
        Action::Right if count > 0 => Transition::Navigate(Navigation {
            selected_menu: wrap_next(nav.selected_menu, count),
            ..nav
        }),
        Action::Enter => {
            if let Some(command) = menus.help_command(nav.selected_menu) {
                return Transition::Effect(nav, Effect::Dispatch(command));
            }
            if menus.item_count(nav.selected_menu) == 0 {
                return Transition::Navigate(nav);
            }
            let opened = nav.with_mode(Mode::Submenu { selected: 0 });
            if menus.needs_live_data(nav.selected_menu) {
                Transition::Effect(opened, Effect::RefreshDynamicItems)
            } else {
                Transition::Navigate(opened)
            }
        }
        Action::ToggleFocus => Transition::Navigate(nav.with_mode(Mode::OutputFocus)),
        Action::CommandEntry => Transition::Effect(nav, Effect::ReadCommandLine),
        _ => Transition::Navigate(nav),
    }
}

/// Submenu: move through items, activate one, or close.
fn update_submenu(nav: Navigation, selected: usize, action: &Action, menus: &MenuModel) -> Transition {
    let count = menus.item_count(nav.selected_menu);
    let Some(item) = menus.item(nav.selected_menu, selected) else {
        return Transition::Navigate(nav.with_mode(Mode::MenuBar));
    };

    match action {
        Action::Up => Transition::Navigate(nav.with_mode(Mode::Submenu {
            selected: wrap_prev(selected, count),
        })),
        Action::Down => Transition::Navigate(nav.with_mode(Mode::Submenu {
            selected: wrap_next(selected, count),
        })),
        Action::Enter if item.has_dynamic_items() => {
            Transition::Navigate(nav.with_mode(Mode::DynamicSubmenu { selected, dynamic: 0 }))
        }
        Action::Enter => Transition::Effect(
            nav.with_mode(Mode::MenuBar),
            Effect::Dispatch(item.command.clone()),
        ),
        Action::Back => Transition::Navigate(nav.with_mode(Mode::MenuBar)),
        _ => Transition::Navigate(nav),
    }
}

/// DynamicSubmenu: move through live entries, run one, or step back.
fn update_dynamic_submenu(
    nav: Navigation,
    selected: usize,
    dynamic: usize,
    action: &Action,
    menus: &MenuModel,
) -> Transition {
    let Some(item) = menus.item(nav.selected_menu, selected) else {
        return Transition::Navigate(nav.with_mode(Mode::MenuBar));
    };
    let entries = item.dynamic_items();
    let Some(entry) = entries.get(dynamic) else {
        return Transition::Navigate(nav.with_mode(Mode::Submenu { selected }));
    };

    match action {
        Action::Up => Transition::Navigate(nav.with_mode(Mode::DynamicSubmenu {
            selected,
            dynamic: wrap_prev(dynamic, entries.len()),
        })),
        Action::Down => Transition::Navigate(nav.with_mode(Mode::DynamicSubmenu {
            selected,
            dynamic: wrap_next(dynamic, entries.len()),
        })),
        Action::Enter => Transition::Effect(
            nav.with_mode(Mode::MenuBar),
            Effect::Dispatch(with_argument(&item.command, entry)),
        ),
        Action::Back => Transition::Navigate(nav.with_mode(Mode::Submenu { selected })),
        _ => Transition::Navigate(nav),
    }
}

/// OutputFocus: scroll, type a command, or return to the menu bar.
///
/// `pending_g` is the count of `g` presses immediately before this action.
fn update_output_focus(nav: Navigation, pending_g: u8, action: &Action) -> Transition {
    let scroll = |request| Transition::Effect(nav, Effect::Scroll(request));

    match action {
        Action::ToggleFocus => Transition::Navigate(nav.with_mode(Mode::MenuBar)),
        Action::Down | Action::ScrollDown => scroll(Scroll::LineDown),
        Action::Up | Action::ScrollUp => scroll(Scroll::LineUp),
        Action::PageDown => scroll(Scroll::PageDown),
        Action::PageUp => scroll(Scroll::PageUp),
        Action::Bottom => scroll(Scroll::Bottom),
        Action::TopPrefix if pending_g >= 1 => scroll(Scroll::Top),
        Action::TopPrefix => Transition::Navigate(Navigation { pending_g: 1, ..nav }),
        Action::Enter => Transition::Effect(nav, Effect::ReadCommandLine),
        _ => Transition::Navigate(nav),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn wrap_next(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + 1) % count
    }
}

fn wrap_prev(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + count - 1) % count
    }
}

// ============================================================================
// TESTS
// ============================================================================
