//! Modal text-entry dialog: title, prompt, one field, OK and Cancel.
//!
//! [`DialogState`] is the pure part: key in, step out. [`show`] owns the
//! nested event loop and returns only once the user confirms or cancels,
//! so no navigation key can reach the menu while a dialog is open.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppEvent, EventSource};

/// Maximum number of characters the field accepts.
pub const MAX_INPUT_CHARS: usize = 50;

/// Which element of the dialog has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Field,
    Ok,
    Cancel,
}

impl Focus {
    /// Field → OK → Cancel → Field.
    pub fn next(self) -> Self {
        match self {
            Focus::Field => Focus::Ok,
            Focus::Ok => Focus::Cancel,
            Focus::Cancel => Focus::Field,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Field => Focus::Cancel,
            Focus::Ok => Focus::Field,
            Focus::Cancel => Focus::Ok,
        }
    }
}

/// Final outcome of a dialog. A cancelled dialog carries no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogResult {
    pub confirmed: bool,
    pub text: String,
}

impl DialogResult {
    pub fn cancelled() -> Self {
        DialogResult {
            confirmed: false,
            text: String::new(),
        }
    }
}

/// Result of feeding one key to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep {
    Continue,
    Done(DialogResult),
}

/// Live state of an open dialog. Exists only for the duration of [`show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogState {
    pub title: String,
    pub prompt: String,
    text: String,
    /// Cursor as a char index, `0..=text.chars().count()`.
    cursor: usize,
    focus: Focus,
}

impl DialogState {
    pub fn new(title: &str, prompt: &str, default_text: &str) -> Self {
        let text: String = default_text.chars().take(MAX_INPUT_CHARS).collect();
        let cursor = text.chars().count();
        DialogState {
            title: title.to_string(),
            prompt: prompt.to_string(),
            text,
            cursor,
            focus: Focus::Field,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogStep {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return DialogStep::Done(DialogResult::cancelled());
        }

        match key.code {
            KeyCode::Esc => return DialogStep::Done(DialogResult::cancelled()),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus = self.focus.prev()
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Enter => match self.focus {
                Focus::Ok if !self.text.is_empty() => {
                    return DialogStep::Done(DialogResult {
                        confirmed: true,
                        text: self.text.clone(),
                    });
                }
                Focus::Cancel => return DialogStep::Done(DialogResult::cancelled()),
                Focus::Ok | Focus::Field => {}
            },
            _ if self.focus != Focus::Field => {}
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && !ch.is_control() =>
            {
                self.insert(ch)
            }
            _ => {}
        }
        DialogStep::Continue
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert(&mut self, ch: char) {
        if self.char_len() >= MAX_INPUT_CHARS {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }
}

/// Run a dialog to completion.
///
/// `draw` is called before every read so the caller can repaint the screen
/// underneath with the dialog on top (resize events simply trigger a
/// repaint at the new size). A closed event source counts as cancel.
pub fn show<E, D>(
    title: &str,
    prompt: &str,
    default_text: &str,
    events: &mut E,
    mut draw: D,
) -> io::Result<DialogResult>
where
    E: EventSource + ?Sized,
    D: FnMut(&DialogState) -> io::Result<()>,
{
    let mut state = DialogState::new(title, prompt, default_text);
    loop {
        draw(&state)?;
        match events.next_event() {
            Some(AppEvent::Key(key)) => {
                if let DialogStep::Done(result) = state.handle_key(key) {
                    return Ok(result);
                }
            }
            Some(AppEvent::Resize(..)) => {}
            None => return Ok(DialogResult::cancelled()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut DialogState, text: &str) {
        for ch in text.chars() {
            assert_eq!(dialog.handle_key(key(KeyCode::Char(ch))), DialogStep::Continue);
        }
    }

    #[test]
    fn commit_scenario_enter_on_field_does_nothing() {
        let mut dialog = DialogState::new("Commit Message", "Please provide a commit message:", "");
        type_text(&mut dialog, "fix bug");

        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert_eq!(dialog.text(), "fix bug");
        assert_eq!(dialog.focus(), Focus::Field);

        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.focus(), Focus::Ok);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(DialogResult {
                confirmed: true,
                text: "fix bug".into()
            })
        );
    }

    #[test]
    fn ok_with_empty_buffer_cannot_confirm() {
        let mut dialog = DialogState::new("t", "p", "");
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
    }

    #[test]
    fn cancel_button_discards_text() {
        let mut dialog = DialogState::new("t", "p", "draft");
        dialog.handle_key(key(KeyCode::Tab));
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.focus(), Focus::Cancel);
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(DialogResult::cancelled())
        );
    }

    #[test]
    fn escape_cancels_from_every_focus() {
        for tabs in 0..3 {
            let mut dialog = DialogState::new("t", "p", "text");
            for _ in 0..tabs {
                dialog.handle_key(key(KeyCode::Tab));
            }
            assert_eq!(
                dialog.handle_key(key(KeyCode::Esc)),
                DialogStep::Done(DialogResult::cancelled())
            );
        }
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut dialog = DialogState::new("t", "p", "");
        let forward: Vec<Focus> = (0..3)
            .map(|_| {
                dialog.handle_key(key(KeyCode::Tab));
                dialog.focus()
            })
            .collect();
        assert_eq!(forward, vec![Focus::Ok, Focus::Cancel, Focus::Field]);

        dialog.handle_key(key(KeyCode::BackTab));
        assert_eq!(dialog.focus(), Focus::Cancel);
        dialog.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT));
        assert_eq!(dialog.focus(), Focus::Ok);
    }

    #[test]
    fn typing_only_edits_while_field_focused() {
        let mut dialog = DialogState::new("t", "p", "ab");
        dialog.handle_key(key(KeyCode::Tab));
        type_text(&mut dialog, "xyz");
        dialog.handle_key(key(KeyCode::Backspace));
        assert_eq!(dialog.text(), "ab");
    }

    #[test]
    fn insert_then_backspace_restores_state() {
        let mut dialog = DialogState::new("t", "p", "hello");
        dialog.handle_key(key(KeyCode::Left));
        dialog.handle_key(key(KeyCode::Left));
        let before = dialog.clone();

        dialog.handle_key(key(KeyCode::Char('é')));
        assert_eq!(dialog.text(), "helélo");
        dialog.handle_key(key(KeyCode::Backspace));
        assert_eq!(dialog, before);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut dialog = DialogState::new("t", "p", "ab");
        for _ in 0..5 {
            dialog.handle_key(key(KeyCode::Right));
        }
        assert_eq!(dialog.cursor(), 2);
        for _ in 0..5 {
            dialog.handle_key(key(KeyCode::Backspace));
        }
        assert_eq!(dialog.cursor(), 0);
        assert_eq!(dialog.text(), "");
        dialog.handle_key(key(KeyCode::Left));
        assert_eq!(dialog.cursor(), 0);
    }

    #[test]
    fn insertion_happens_at_cursor() {
        let mut dialog = DialogState::new("t", "p", "ac");
        dialog.handle_key(key(KeyCode::Left));
        type_text(&mut dialog, "b");
        assert_eq!(dialog.text(), "abc");
        dialog.handle_key(key(KeyCode::Home));
        dialog.handle_key(key(KeyCode::Delete));
        assert_eq!(dialog.text(), "bc");
        dialog.handle_key(key(KeyCode::End));
        assert_eq!(dialog.cursor(), 2);
    }

    #[test]
    fn input_is_capped_at_fifty_chars() {
        let mut dialog = DialogState::new("t", "p", "");
        type_text(&mut dialog, &"x".repeat(60));
        assert_eq!(dialog.text().chars().count(), MAX_INPUT_CHARS);
        assert_eq!(dialog.cursor(), MAX_INPUT_CHARS);

        let long_default = DialogState::new("t", "p", &"y".repeat(80));
        assert_eq!(long_default.text().len(), MAX_INPUT_CHARS);
    }

    #[test]
    fn control_chords_are_not_inserted() {
        let mut dialog = DialogState::new("t", "p", "");
        dialog.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(dialog.text(), "");
        assert_eq!(
            dialog.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            DialogStep::Done(DialogResult::cancelled())
        );
    }

    #[test]
    fn default_text_places_cursor_at_end() {
        let dialog = DialogState::new("t", "p", "main");
        assert_eq!(dialog.cursor(), 4);
        assert_eq!(dialog.focus(), Focus::Field);
    }

    #[test]
    fn show_runs_until_confirmed_and_redraws_each_event() {
        let mut events: VecDeque<AppEvent> = VecDeque::new();
        for ch in "wip".chars() {
            events.push_back(AppEvent::Key(key(KeyCode::Char(ch))));
        }
        events.push_back(AppEvent::Resize(100, 40));
        events.push_back(AppEvent::Key(key(KeyCode::Tab)));
        events.push_back(AppEvent::Key(key(KeyCode::Enter)));

        let mut draws = 0;
        let result = show("Commit Message", "msg", "", &mut events, |_| {
            draws += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(result, DialogResult { confirmed: true, text: "wip".into() });
        assert_eq!(draws, 6);
        assert!(events.is_empty());
    }

    #[test]
    fn show_treats_closed_input_as_cancel() {
        let mut events: VecDeque<AppEvent> = VecDeque::new();
        events.push_back(AppEvent::Key(key(KeyCode::Char('x'))));
        let result = show("t", "p", "", &mut events, |_| Ok(())).unwrap();
        assert_eq!(result, DialogResult::cancelled());
    }
}
