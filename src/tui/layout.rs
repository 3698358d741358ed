//! Screen geometry: the four bands and the overlay rectangles.
//!
//! Everything here is a pure function of the terminal area and the menu
//! tree, recomputed on every draw. Overlays are clipped to the area so a
//! small terminal never yields a rect outside the buffer.

use ratatui::layout::{Constraint, Layout, Rect};

use crate::menu::Menu;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const MENU_BAR_HEIGHT: u16 = 3;
pub const INPUT_HEIGHT: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;

/// Columns reserved at the right of the output pane for the scrollbar.
pub const SCROLLBAR_GUTTER: u16 = 2;

/// Offset of the first menu title from the left edge of the bar.
pub const MENU_TITLE_INDENT: u16 = 2;
/// Spacing between consecutive menu titles.
pub const MENU_TITLE_GAP: u16 = 2;

pub const SUBMENU_WIDTH: u16 = 20;
pub const DYNAMIC_SUBMENU_WIDTH: u16 = 30;

pub const DIALOG_WIDTH: u16 = 60;
pub const DIALOG_HEIGHT: u16 = 7;

// ============================================================================
// BANDS
// ============================================================================

/// The four fixed horizontal bands, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bands {
    pub menu_bar: Rect,
    pub output: Rect,
    pub input: Rect,
    pub status: Rect,
}

impl Bands {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::vertical([
            Constraint::Length(MENU_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

        Bands {
            menu_bar: chunks[0],
            output: chunks[1],
            input: chunks[2],
            status: chunks[3],
        }
    }

    /// Rows of output text visible inside the bordered output band.
    pub fn visible_output_rows(&self) -> usize {
        usize::from(self.output.height.saturating_sub(2))
    }

    /// Split the inside of the output border into text and scrollbar gutter.
    pub fn output_columns(&self) -> (Rect, Rect) {
        let inner = inset(self.output);
        let gutter_width = SCROLLBAR_GUTTER.min(inner.width);
        let text = Rect {
            width: inner.width - gutter_width,
            ..inner
        };
        let gutter = Rect {
            x: text.right(),
            width: gutter_width,
            ..inner
        };
        (text, gutter)
    }
}

// ============================================================================
// OVERLAYS
// ============================================================================

/// Column of a menu title, relative to the left edge of the menu bar.
pub fn menu_title_offset(menus: &[Menu], index: usize) -> u16 {
    let preceding: usize = menus
        .iter()
        .take(index)
        .map(|menu| menu.name.chars().count() + usize::from(MENU_TITLE_GAP))
        .sum();
    MENU_TITLE_INDENT.saturating_add(u16::try_from(preceding).unwrap_or(u16::MAX))
}

/// Popup listing a menu's items, directly below its title.
pub fn submenu_rect(area: Rect, menus: &[Menu], menu_index: usize) -> Rect {
    let item_count = menus.get(menu_index).map_or(0, |m| m.items.len());
    let rect = Rect {
        x: area.x.saturating_add(menu_title_offset(menus, menu_index)),
        y: area.y.saturating_add(MENU_BAR_HEIGHT),
        width: SUBMENU_WIDTH,
        height: bordered_height(item_count),
    };
    clip(rect, area)
}

/// Popup listing dynamic items, right of the submenu and level with the
/// highlighted row.
pub fn dynamic_submenu_rect(area: Rect, menus: &[Menu], menu_index: usize, selected: usize, count: usize) -> Rect {
    let submenu_x = area.x.saturating_add(menu_title_offset(menus, menu_index));
    let row = u16::try_from(selected).unwrap_or(u16::MAX);
    let rect = Rect {
        x: submenu_x.saturating_add(SUBMENU_WIDTH),
        y: area
            .y
            .saturating_add(MENU_BAR_HEIGHT)
            .saturating_add(row)
            .saturating_add(1),
        width: DYNAMIC_SUBMENU_WIDTH,
        height: bordered_height(count),
    };
    clip(rect, area)
}

/// Fixed-size dialog box centred in `area`.
pub fn dialog_rect(area: Rect) -> Rect {
    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn bordered_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
}

/// Inside of a one-cell border.
fn inset(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

/// Restrict `rect` to `area`. A rect entirely outside collapses to zero size.
pub fn clip(rect: Rect, area: Rect) -> Rect {
    let x = rect.x.clamp(area.x, area.right());
    let y = rect.y.clamp(area.y, area.bottom());
    let right = rect.right().min(area.right()).max(x);
    let bottom = rect.bottom().min(area.bottom()).max(y);
    Rect {
        x,
        y,
        width: right - x,
        height: bottom - y,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuItem;

    fn menu(name: &str, items: usize) -> Menu {
        Menu {
            name: name.to_string(),
            items: (0..items)
                .map(|i| MenuItem::new(&format!("Item {}", i), "status", ""))
                .collect(),
        }
    }

    fn sample_menus() -> Vec<Menu> {
        vec![menu("File", 1), menu("Branch", 7), menu("Git", 10), menu("Help", 1)]
    }

    #[test]
    fn bands_cover_the_screen() {
        let bands = Bands::new(Rect::new(0, 0, 80, 24));
        assert_eq!(bands.menu_bar, Rect::new(0, 0, 80, 3));
        assert_eq!(bands.output, Rect::new(0, 3, 80, 17));
        assert_eq!(bands.input, Rect::new(0, 20, 80, 3));
        assert_eq!(bands.status, Rect::new(0, 23, 80, 1));
        assert_eq!(bands.visible_output_rows(), 15);
    }

    #[test]
    fn output_height_twenty_shows_eighteen_rows() {
        let bands = Bands::new(Rect::new(0, 0, 80, 27));
        assert_eq!(bands.output.height, 20);
        assert_eq!(bands.visible_output_rows(), 18);
    }

    #[test]
    fn tiny_terminal_has_no_visible_rows() {
        let bands = Bands::new(Rect::new(0, 0, 10, 5));
        assert_eq!(bands.visible_output_rows(), 0);
    }

    #[test]
    fn output_columns_reserve_gutter() {
        let bands = Bands::new(Rect::new(0, 0, 80, 24));
        let (text, gutter) = bands.output_columns();
        assert_eq!(text, Rect::new(1, 4, 76, 15));
        assert_eq!(gutter, Rect::new(77, 4, 2, 15));
    }

    #[test]
    fn title_offsets_accumulate() {
        let menus = sample_menus();
        assert_eq!(menu_title_offset(&menus, 0), 2);
        assert_eq!(menu_title_offset(&menus, 1), 2 + 6);
        assert_eq!(menu_title_offset(&menus, 2), 2 + 6 + 8);
    }

    #[test]
    fn submenu_sits_below_its_title() {
        let menus = sample_menus();
        let rect = submenu_rect(Rect::new(0, 0, 80, 24), &menus, 1);
        assert_eq!(rect, Rect::new(8, 3, 20, 9));
    }

    #[test]
    fn dynamic_submenu_aligns_with_highlighted_row() {
        let menus = sample_menus();
        let rect = dynamic_submenu_rect(Rect::new(0, 0, 80, 24), &menus, 2, 4, 2);
        assert_eq!(rect, Rect::new(16 + 20, 3 + 4 + 1, 30, 4));
    }

    #[test]
    fn overlays_are_clipped_to_small_screens() {
        let menus = sample_menus();
        let area = Rect::new(0, 0, 30, 8);
        let sub = submenu_rect(area, &menus, 2);
        assert_eq!(sub, Rect::new(16, 3, 14, 5));

        let dynamic = dynamic_submenu_rect(area, &menus, 2, 9, 3);
        assert_eq!(dynamic.width, 0);
        assert_eq!(dynamic.x, area.right());
    }

    #[test]
    fn dialog_is_centred_and_fits() {
        assert_eq!(dialog_rect(Rect::new(0, 0, 80, 24)), Rect::new(10, 8, 60, 7));
        assert_eq!(dialog_rect(Rect::new(0, 0, 40, 5)), Rect::new(0, 0, 40, 5));
    }

    #[test]
    fn clip_keeps_inside_rects() {
        let area = Rect::new(0, 0, 10, 10);
        assert_eq!(clip(Rect::new(2, 2, 3, 3), area), Rect::new(2, 2, 3, 3));
        assert_eq!(clip(Rect::new(8, 8, 5, 5), area), Rect::new(8, 8, 2, 2));
        assert_eq!(clip(Rect::new(20, 20, 5, 5), area), Rect::new(10, 10, 0, 0));
    }
}
