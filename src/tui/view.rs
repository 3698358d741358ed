//! Pure rendering: map App state to ratatui widget trees.
//!
//! `render()` draws the four bands, then whatever overlays the current
//! mode implies, then the dialog if one is open. Nothing is retained
//! between draws; overlays are rebuilt from the navigation state every
//! time, which is what makes a resize with a submenu open safe.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use super::dialog::{DialogState, Focus};
use super::layout::{dialog_rect, dynamic_submenu_rect, submenu_rect, Bands};
use super::line_input::{LineInput, PROMPT};
use super::state::{App, Mode};
use super::theme;

/// What is drawn on top of the four bands, besides submenus.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    None,
    Dialog(&'a DialogState),
    CommandLine(&'a LineInput),
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole screen to the terminal frame.
pub fn render(app: &App, overlay: Overlay<'_>, frame: &mut Frame) {
    let area = frame.area();
    let bands = Bands::new(area);

    render_menu_bar(app, frame, bands.menu_bar);
    render_output(app, frame, &bands);
    render_input(app, overlay, frame, bands.input);
    render_status(app, frame, bands.status);

    match app.nav.mode {
        Mode::Submenu { selected } => {
            render_submenu(app, selected, frame, area);
        }
        Mode::DynamicSubmenu { selected, dynamic } => {
            render_submenu(app, selected, frame, area);
            render_dynamic_submenu(app, selected, dynamic, frame, area);
        }
        Mode::MenuBar | Mode::OutputFocus => {}
    }

    if let Overlay::Dialog(dialog) = overlay {
        render_dialog(dialog, frame, dialog_rect(area));
    }
}

// ============================================================================
// BANDS
// ============================================================================

fn border_style(focused: bool) -> ratatui::style::Style {
    if focused {
        theme::STYLE_FOCUSED_BORDER
    } else {
        theme::STYLE_DIM
    }
}

fn render_menu_bar(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.nav.mode != Mode::OutputFocus;
    let mut spans = vec![Span::raw(" ")];
    for (i, menu) in app.menus.menus().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if i == app.nav.selected_menu {
            theme::STYLE_SELECTED
        } else {
            theme::STYLE_TITLE
        };
        spans.push(Span::styled(menu.name.as_str(), style));
    }

    let block = Block::bordered().border_style(border_style(focused));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_output(app: &App, frame: &mut Frame, bands: &Bands) {
    let focused = app.nav.mode == Mode::OutputFocus;
    let block = Block::bordered()
        .title(" Output ")
        .border_style(border_style(focused));
    frame.render_widget(block, bands.output);

    let rows = bands.visible_output_rows();
    let (text_area, gutter) = bands.output_columns();

    let lines: Vec<Line> = app
        .viewport
        .visible_slice(rows)
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), text_area);

    let Some(bar) = app.viewport.scrollbar(rows) else {
        return;
    };
    if gutter.width == 0 {
        return;
    }
    let x = gutter.right() - 1;
    let buf = frame.buffer_mut();
    for row in 0..rows.min(usize::from(gutter.height)) {
        let in_thumb = row >= bar.thumb_pos && row < bar.thumb_pos + bar.thumb_len;
        let (symbol, style) = if in_thumb {
            ("█", theme::STYLE_THUMB)
        } else {
            ("│", theme::STYLE_DIM)
        };
        let y = gutter.y + row as u16;
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

/// Input band: the live command line, or key hints for the current mode.
fn render_input(app: &App, overlay: Overlay<'_>, frame: &mut Frame, area: Rect) {
    let typing = matches!(overlay, Overlay::CommandLine(_));
    let block = Block::bordered()
        .title(" Command ")
        .border_style(border_style(typing));

    let line = match overlay {
        Overlay::CommandLine(input) => {
            let (before, at, after) = input.render_parts();
            let cursor = at.map_or_else(|| " ".to_string(), String::from);
            Line::from(vec![
                Span::styled(PROMPT, theme::STYLE_TITLE),
                Span::raw(before),
                Span::styled(cursor, theme::STYLE_CURSOR),
                Span::raw(after),
            ])
        }
        Overlay::None | Overlay::Dialog(_) => Line::from(Span::styled(key_hints(app.nav.mode), theme::STYLE_DIM)),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::MenuBar => "[←/→] menus  [Enter] open  [Tab] output  [i] command  [^C] quit",
        Mode::Submenu { .. } => "[↑/↓] move  [Enter] run  [Esc] close",
        Mode::DynamicSubmenu { .. } => "[↑/↓] move  [Enter] run  [Esc] back",
        Mode::OutputFocus => "[j/k] scroll  [gg/G] top/bottom  [PgUp/PgDn] page  [Enter] command  [Tab] menus",
    }
}

/// Status band: item description on the left, branch and state on the right.
fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let status = format!("{} ", app.status);
    let width = u16::try_from(status.chars().count()).unwrap_or(u16::MAX);
    let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);

    let description = Paragraph::new(format!(" {}", app.description())).style(theme::STYLE_STATUS_BAR);
    frame.render_widget(description, left);

    let info = Paragraph::new(Line::from(vec![
        Span::raw(format!("{} (", app.status.branch)),
        Span::styled(app.status.status.to_string(), theme::status_style(&app.status.status)),
        Span::raw(") "),
    ]))
    .style(theme::STYLE_STATUS_BAR)
    .alignment(Alignment::Right);
    frame.render_widget(info, right);
}

// ============================================================================
// OVERLAYS
// ============================================================================

/// One row per entry, the selected one highlighted.
fn list_lines(entries: &[&str], selected: usize) -> Vec<Line<'static>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i == selected {
                Line::from(Span::styled(format!(" {}", entry), theme::STYLE_SELECTED))
            } else {
                Line::from(format!(" {}", entry))
            }
        })
        .collect()
}

fn render_submenu(app: &App, selected: usize, frame: &mut Frame, area: Rect) {
    let Some(menu) = app.menus.menu(app.nav.selected_menu) else {
        return;
    };
    let rect = submenu_rect(area, app.menus.menus(), app.nav.selected_menu);
    let labels: Vec<&str> = menu.items.iter().map(|item| item.label.as_str()).collect();
    let focused = matches!(app.nav.mode, Mode::Submenu { .. });

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(list_lines(&labels, selected)).block(Block::bordered().border_style(border_style(focused))),
        rect,
    );
}

fn render_dynamic_submenu(app: &App, selected: usize, dynamic: usize, frame: &mut Frame, area: Rect) {
    let Some(item) = app.menus.item(app.nav.selected_menu, selected) else {
        return;
    };
    let entries: Vec<&str> = item.dynamic_items().iter().map(String::as_str).collect();
    let rect = dynamic_submenu_rect(area, app.menus.menus(), app.nav.selected_menu, selected, entries.len());

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(list_lines(&entries, dynamic))
            .block(Block::bordered().border_style(theme::STYLE_FOCUSED_BORDER)),
        rect,
    );
}

fn render_dialog(dialog: &DialogState, frame: &mut Frame, rect: Rect) {
    let button = |label: &'static str, focus: Focus| {
        let style = if dialog.focus() == focus {
            theme::STYLE_BUTTON_FOCUSED
        } else {
            theme::STYLE_BUTTON
        };
        Span::styled(label, style)
    };

    let text = dialog.text();
    let split = text
        .char_indices()
        .nth(dialog.cursor())
        .map_or(text.len(), |(i, _)| i);
    let (before, rest) = text.split_at(split);
    let mut rest_chars = rest.chars();
    let at = rest_chars.next().map_or_else(|| " ".to_string(), String::from);
    let after = rest_chars.as_str();
    let cursor_style = if dialog.focus() == Focus::Field {
        theme::STYLE_CURSOR
    } else {
        ratatui::style::Style::new()
    };

    let lines = vec![
        Line::from(format!(" {}", dialog.prompt)),
        Line::from(""),
        Line::from(vec![
            Span::raw(" > "),
            Span::raw(before),
            Span::styled(at, cursor_style),
            Span::raw(after),
        ]),
        Line::from(""),
        Line::from(vec![
            button("  OK  ", Focus::Ok),
            Span::raw("    "),
            button(" Cancel ", Focus::Cancel),
        ])
        .alignment(Alignment::Center),
    ];

    let block = Block::bordered()
        .title(format!(" {} ", dialog.title))
        .border_style(theme::STYLE_FOCUSED_BORDER);

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

// ============================================================================
// TESTS
// ============================================================================
