//! Scrollable output pane: lines, scroll offset, scrollbar geometry.
//!
//! The visible height is not stored. Every operation that depends on it
//! takes it as an argument, because the layout can change between any two
//! events. The offset is clamped to `[0, max(0, lines - height)]` after
//! every mutation.

/// A scroll request from OutputFocus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Scrollbar thumb, in rows relative to the top of the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarGeometry {
    pub thumb_len: usize,
    pub thumb_pos: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    lines: Vec<String>,
    scroll: usize,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content, keeping the offset if it is still valid.
    pub fn set_content(&mut self, text: &str, height: usize) {
        self.lines = text.lines().map(str::to_string).collect();
        self.clamp(height);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn scroll_position(&self) -> usize {
        self.scroll
    }

    pub fn max_scroll(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }

    /// Pull the offset back into range, e.g. after a resize.
    pub fn clamp(&mut self, height: usize) {
        self.scroll = self.scroll.min(self.max_scroll(height));
    }

    /// Apply a scroll request. Returns true if the offset moved.
    pub fn scroll(&mut self, request: Scroll, height: usize) -> bool {
        let before = self.scroll;
        let max = self.max_scroll(height);
        self.scroll = match request {
            Scroll::LineUp => self.scroll.saturating_sub(1),
            Scroll::LineDown => (self.scroll + 1).min(max),
            Scroll::PageUp => self.scroll.saturating_sub(height),
            Scroll::PageDown => (self.scroll + height).min(max),
            Scroll::Top => 0,
            Scroll::Bottom => max,
        };
        self.clamp(height);
        self.scroll != before
    }

    /// `lines[scroll .. scroll + height]`, clipped at the end of content.
    pub fn visible_slice(&self, height: usize) -> &[String] {
        let start = self.scroll.min(self.lines.len());
        let end = (start + height).min(self.lines.len());
        &self.lines[start..end]
    }

    pub fn scrollbar(&self, height: usize) -> Option<ScrollbarGeometry> {
        scrollbar_geometry(self.lines.len(), height, self.scroll)
    }
}

/// Thumb size and position for `total` lines shown `visible` at a time.
///
/// - length = max(1, round(V·V / L))
/// - position = round(offset·(V − length) / (L − V))
///
/// `None` when everything fits (L ≤ V) or there is no track (V = 0).
pub fn scrollbar_geometry(total: usize, visible: usize, offset: usize) -> Option<ScrollbarGeometry> {
    if visible == 0 || total <= visible {
        return None;
    }

    let thumb_len = div_round(visible * visible, total).clamp(1, visible);
    let range = total - visible;
    let offset = offset.min(range);
    let thumb_pos = div_round(offset * (visible - thumb_len), range);

    Some(ScrollbarGeometry {
        thumb_len,
        thumb_pos: thumb_pos.min(visible - thumb_len),
    })
}

/// Integer division rounding half up.
fn div_round(numerator: usize, denominator: usize) -> usize {
    (2 * numerator + denominator) / (2 * denominator)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn set_content_splits_lines() {
        let mut vp = Viewport::new();
        vp.set_content("a\nb\r\nc\n", 10);
        assert_eq!(vp.lines(), ["a", "b", "c"]);
        vp.set_content("", 10);
        assert!(vp.is_empty());
    }

    #[test]
    fn hundred_lines_bottom_then_top() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(100), 18);
        for _ in 0..17 {
            vp.scroll(Scroll::LineDown, 18);
        }
        assert_eq!(vp.scroll_position(), 17);
        vp.scroll(Scroll::Bottom, 18);
        assert_eq!(vp.scroll_position(), 82);
        vp.scroll(Scroll::Top, 18);
        assert_eq!(vp.scroll_position(), 0);
    }

    #[test]
    fn line_scrolling_stops_at_edges() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(5), 3);
        assert!(!vp.scroll(Scroll::LineUp, 3));
        assert!(vp.scroll(Scroll::LineDown, 3));
        assert!(vp.scroll(Scroll::LineDown, 3));
        assert!(!vp.scroll(Scroll::LineDown, 3));
        assert_eq!(vp.scroll_position(), 2);
    }

    #[test]
    fn paging_is_clamped() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(50), 20);
        vp.scroll(Scroll::PageDown, 20);
        assert_eq!(vp.scroll_position(), 20);
        vp.scroll(Scroll::PageDown, 20);
        assert_eq!(vp.scroll_position(), 30);
        vp.scroll(Scroll::PageUp, 20);
        assert_eq!(vp.scroll_position(), 10);
        vp.scroll(Scroll::PageUp, 20);
        assert_eq!(vp.scroll_position(), 0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(3), 10);
        for request in [Scroll::LineDown, Scroll::PageDown, Scroll::Bottom] {
            vp.scroll(request, 10);
            assert_eq!(vp.scroll_position(), 0);
        }
        assert!(vp.scrollbar(10).is_none());
    }

    #[test]
    fn new_shorter_content_reclamps() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(100), 10);
        vp.scroll(Scroll::Bottom, 10);
        assert_eq!(vp.scroll_position(), 90);
        vp.set_content(&numbered(15), 10);
        assert_eq!(vp.scroll_position(), 5);
    }

    #[test]
    fn scroll_survives_compatible_new_content() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(100), 10);
        vp.scroll(Scroll::PageDown, 10);
        vp.set_content(&numbered(100), 10);
        assert_eq!(vp.scroll_position(), 10);
    }

    #[test]
    fn taller_viewport_reclamps() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(30), 10);
        vp.scroll(Scroll::Bottom, 10);
        assert_eq!(vp.scroll_position(), 20);
        vp.clamp(25);
        assert_eq!(vp.scroll_position(), 5);
        vp.clamp(40);
        assert_eq!(vp.scroll_position(), 0);
    }

    #[test]
    fn visible_slice_is_clipped() {
        let mut vp = Viewport::new();
        vp.set_content(&numbered(10), 4);
        vp.scroll(Scroll::Bottom, 4);
        let slice = vp.visible_slice(4);
        assert_eq!(slice.len(), 4);
        assert_eq!(slice[0], "line 6");
        assert_eq!(vp.visible_slice(0).len(), 0);

        // A taller request than remaining content is clipped, not padded.
        assert_eq!(vp.visible_slice(100).len(), 4);
    }

    #[test]
    fn scrollbar_examples() {
        assert_eq!(
            scrollbar_geometry(100, 18, 0),
            Some(ScrollbarGeometry { thumb_len: 3, thumb_pos: 0 })
        );
        assert_eq!(
            scrollbar_geometry(100, 18, 82),
            Some(ScrollbarGeometry { thumb_len: 3, thumb_pos: 15 })
        );
        assert_eq!(
            scrollbar_geometry(20, 10, 5),
            Some(ScrollbarGeometry { thumb_len: 5, thumb_pos: 3 })
        );
        assert_eq!(scrollbar_geometry(10, 10, 0), None);
        assert_eq!(scrollbar_geometry(10, 0, 0), None);
    }

    #[test]
    fn tiny_ratio_still_has_one_row_thumb() {
        let bar = scrollbar_geometry(10_000, 5, 0).unwrap();
        assert_eq!(bar.thumb_len, 1);
        let bar = scrollbar_geometry(10_000, 5, 9_995).unwrap();
        assert_eq!(bar.thumb_pos, 4);
    }

    #[test]
    fn scrollbar_bounds_hold_everywhere() {
        for total in 1..60 {
            for visible in 1..total {
                for offset in 0..=(total - visible) {
                    let bar = scrollbar_geometry(total, visible, offset).unwrap();
                    assert!(bar.thumb_len >= 1 && bar.thumb_len <= visible);
                    assert!(bar.thumb_pos <= visible - bar.thumb_len);
                }
            }
        }
    }

    #[test]
    fn scroll_position_stays_in_bounds_under_any_sequence() {
        let requests = [
            Scroll::LineUp,
            Scroll::LineDown,
            Scroll::PageUp,
            Scroll::PageDown,
            Scroll::Top,
            Scroll::Bottom,
        ];
        let mut vp = Viewport::new();
        let mut height = 18;
        vp.set_content(&numbered(100), height);
        // Deterministic pseudo-random walk mixing scrolls, resizes and new content.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..5_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            match seed % 10 {
                0 => {
                    height = (seed >> 8) as usize % 40;
                    vp.clamp(height);
                }
                1 => vp.set_content(&numbered((seed >> 16) as usize % 150), height),
                n => {
                    vp.scroll(requests[n as usize % requests.len()], height);
                }
            }

            assert!(vp.scroll_position() <= vp.max_scroll(height));
            assert!(vp.visible_slice(height).len() <= height);
            if let Some(bar) = vp.scrollbar(height) {
                assert!(bar.thumb_len >= 1 && bar.thumb_pos + bar.thumb_len <= height);
            }
        }
    }
}
