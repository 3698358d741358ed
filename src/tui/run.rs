//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and to the git backend.
//!
//! Architecture: a key reader thread feeds a single mpsc channel. The
//! event loop consumes from it, and so do the dialog and command-line
//! sub-loops while they own the keyboard. Backend calls are synchronous:
//! the loop does not read the next event until git has returned.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{debug, info};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::backend::GitBackend;
use crate::commands::{changes_branch_list, route, with_argument, Route};
use crate::help::format_help;
use crate::types::{StatusInfo, UiConfig};

use super::dialog;
use super::layout::Bands;
use super::line_input::read_line;
use super::state::{Action, App, AppEvent, Effect, EventSource, Transition};
use super::update::update;
use super::view::{render, Overlay};

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// The mapping does not depend on mode; `update` decides what each action
/// means where it arrives.
pub fn map_key(key: KeyEvent) -> Action {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Left => Action::Left,
        KeyCode::Right => Action::Right,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Enter => Action::Enter,
        KeyCode::Esc => Action::Back,
        KeyCode::Tab => Action::ToggleFocus,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        KeyCode::Char('i') | KeyCode::Char('I') => Action::CommandEntry,
        KeyCode::Char('j') => Action::ScrollDown,
        KeyCode::Char('k') => Action::ScrollUp,
        KeyCode::Char('g') => Action::TopPrefix,
        KeyCode::Char('G') => Action::Bottom,

        _ => Action::Other,
    }
}

// ============================================================================
// DRAWING SURFACE
// ============================================================================

/// Where the app is drawn. A real terminal in production, a test backend
/// in tests.
pub trait Surface {
    /// Current drawable area.
    fn screen_area(&mut self) -> io::Result<Rect>;
    fn draw_app(&mut self, app: &App, overlay: Overlay<'_>) -> io::Result<()>;
    /// React to a resize event.
    fn apply_resize(&mut self, width: u16, height: u16) -> io::Result<()>;
}

impl<B> Surface for Terminal<B>
where
    B: Backend,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    fn screen_area(&mut self) -> io::Result<Rect> {
        let size = self.size().map_err(io::Error::other)?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw_app(&mut self, app: &App, overlay: Overlay<'_>) -> io::Result<()> {
        self.draw(|frame| render(app, overlay, frame))
            .map(|_| ())
            .map_err(io::Error::other)
    }

    /// The backend already knows its new size; just resync buffers.
    fn apply_resize(&mut self, _width: u16, _height: u16) -> io::Result<()> {
        self.autoresize().map_err(io::Error::other)
    }
}

/// Recompute the layout for the current screen size and draw.
fn redraw<S: Surface + ?Sized>(app: &mut App, surface: &mut S, overlay: Overlay<'_>) -> io::Result<()> {
    let area = surface.screen_area()?;
    app.resize(Bands::new(area).visible_output_rows());
    surface.draw_app(app, overlay)
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// KEY READER
// ============================================================================

/// Spawn a thread that forwards key presses and resizes to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(width, height)) => AppEvent::Resize(width, height),
                Ok(_) => continue, // releases, mouse, focus, paste
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
///
/// Sets up the terminal, starts the key reader and runs the event loop.
/// The terminal is restored even when the loop fails.
pub fn run<G: GitBackend + ?Sized>(config: UiConfig, backend: &G) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(config);

    let (tx, mut rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    let result = event_loop(&mut app, backend, &mut terminal, &mut rx);
    restore_terminal()?;
    result
}

/// The main loop: draw, read one event, apply it.
///
/// A closed event source is an error: the user never got to quit.
pub fn event_loop<G, S, E>(app: &mut App, backend: &G, surface: &mut S, events: &mut E) -> io::Result<()>
where
    G: GitBackend + ?Sized,
    S: Surface + ?Sized,
    E: EventSource + ?Sized,
{
    refresh_branches(app, backend);
    refresh_status(app, backend);

    loop {
        redraw(app, surface, Overlay::None)?;

        if app.should_quit {
            return Ok(());
        }

        let Some(event) = events.next_event() else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed"));
        };

        match event {
            AppEvent::Resize(width, height) => {
                debug!("resize to {}x{}", width, height);
                surface.apply_resize(width, height)?;
            }
            AppEvent::Key(key) => match update(app.nav, &map_key(key), &app.menus) {
                Transition::Navigate(nav) => app.nav = nav,
                Transition::Quit => app.should_quit = true,
                Transition::Effect(nav, effect) => {
                    app.nav = nav;
                    handle_effect(effect, app, backend, surface, events)?;
                    app.nav = app.nav.reconciled(&app.menus);
                }
            },
        }
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
fn handle_effect<G, S, E>(
    effect: Effect,
    app: &mut App,
    backend: &G,
    surface: &mut S,
    events: &mut E,
) -> io::Result<()>
where
    G: GitBackend + ?Sized,
    S: Surface + ?Sized,
    E: EventSource + ?Sized,
{
    match effect {
        Effect::Scroll(request) => {
            app.viewport.scroll(request, app.output_rows);
        }
        Effect::RefreshDynamicItems => refresh_branches(app, backend),
        Effect::ReadCommandLine => {
            let mut history = std::mem::take(&mut app.history);
            let line = read_line(&mut history, events, |input| {
                redraw(app, surface, Overlay::CommandLine(input))
            });
            app.history = history;
            if let Some(line) = line? {
                dispatch(&line, app, backend, surface, events)?;
            }
        }
        Effect::Dispatch(command) => dispatch(&command, app, backend, surface, events)?,
    }
    Ok(())
}

/// Route a command string: quit, show help, prompt for a parameter, or run.
pub fn dispatch<G, S, E>(
    command: &str,
    app: &mut App,
    backend: &G,
    surface: &mut S,
    events: &mut E,
) -> io::Result<()>
where
    G: GitBackend + ?Sized,
    S: Surface + ?Sized,
    E: EventSource + ?Sized,
{
    match route(command) {
        Route::Quit => {
            info!("exit requested");
            app.should_quit = true;
        }
        Route::ShowHelp => {
            app.show_output(&format_help(&app.help));
            refresh_status(app, backend);
        }
        Route::Ask(prompt) => {
            let answer = dialog::show(prompt.title, prompt.prompt, "", events, |state| {
                redraw(app, surface, Overlay::Dialog(state))
            })?;
            if answer.confirmed {
                execute_and_display(&with_argument(command, &answer.text), app, backend);
            } else {
                debug!("'{}' cancelled", command);
            }
        }
        Route::Run => execute_and_display(command, app, backend),
    }
    Ok(())
}

/// The single path every backend call goes through.
fn execute_and_display<G: GitBackend + ?Sized>(command_line: &str, app: &mut App, backend: &G) {
    info!("git {}", command_line);
    let output = backend.execute_command(command_line);
    app.show_output(&output);

    if changes_branch_list(command_line) {
        refresh_branches(app, backend);
    }
    refresh_status(app, backend);
}

fn refresh_branches<G: GitBackend + ?Sized>(app: &mut App, backend: &G) {
    let branches = backend.local_branches();
    let updated = app.menus.refresh_dynamic_items(&branches);
    debug!("{} branches loaded into {} menu items", branches.len(), updated);
}

fn refresh_status<G: GitBackend + ?Sized>(app: &mut App, backend: &G) {
    app.status = StatusInfo {
        branch: backend.current_branch(),
        status: backend.repository_status(),
    };
}

// ============================================================================
// TESTS
// ============================================================================
