//! Free-text command line shown in the input band.
//!
//! Used by `i`/`I` from the menu bar and by Enter in the output pane.
//! Editing keys work like a shell prompt; up/down walk the lines entered
//! earlier in this session.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppEvent, EventSource};

pub const PROMPT: &str = "git> ";

/// Longest command line accepted.
pub const MAX_LINE_CHARS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Lines entered this session, oldest first. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line. Blank lines and immediate repeats are skipped.
    pub fn record(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.entries.last().is_some_and(|last| last == line) {
            return;
        }
        self.entries.push(line.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    history: Vec<String>,
    /// Index into `history` while recalling; None while editing a fresh line.
    recall: Option<usize>,
    /// What was typed before the first recall, restored when walking past
    /// the newest entry.
    draft: String,
}

impl LineInput {
    pub fn new(history: &CommandHistory) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            history: history.entries().to_vec(),
            recall: None,
            draft: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let at = self.char_to_byte(self.cursor);
        match self.text[at..].chars().next() {
            Some(ch) => (&self.text[..at], Some(ch), &self.text[at + ch.len_utf8()..]),
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Char('c') if ctrl => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,

            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.char_len(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let at = self.char_to_byte(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.char_to_byte(self.cursor);
                    self.text.remove(at);
                }
            }
            KeyCode::Char(ch) if !ctrl && !ch.is_control() => {
                if self.char_len() < MAX_LINE_CHARS {
                    let at = self.char_to_byte(self.cursor);
                    self.text.insert(at, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn recall_older(&mut self) {
        let next = match self.recall {
            None if self.history.is_empty() => return,
            None => {
                self.draft = self.text.clone();
                self.history.len() - 1
            }
            Some(0) => return,
            Some(i) => i - 1,
        };
        self.recall = Some(next);
        self.replace_text(self.history[next].clone());
    }

    fn recall_newer(&mut self) {
        match self.recall {
            None => {}
            Some(i) if i + 1 < self.history.len() => {
                self.recall = Some(i + 1);
                self.replace_text(self.history[i + 1].clone());
            }
            Some(_) => {
                self.recall = None;
                let draft = std::mem::take(&mut self.draft);
                self.replace_text(draft);
            }
        }
    }

    fn replace_text(&mut self, text: String) {
        self.text = text;
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(b, _)| b)
    }
}

/// Read one command line.
///
/// Returns the trimmed line on submit, or None if the user cancelled or
/// submitted nothing. Submitted lines are recorded in `history`.
pub fn read_line<E, D>(
    history: &mut CommandHistory,
    events: &mut E,
    mut draw: D,
) -> io::Result<Option<String>>
where
    E: EventSource + ?Sized,
    D: FnMut(&LineInput) -> io::Result<()>,
{
    let mut input = LineInput::new(history);
    loop {
        draw(&input)?;
        let key = match events.next_event() {
            Some(AppEvent::Key(key)) => key,
            Some(AppEvent::Resize(..)) => continue,
            None => return Ok(None),
        };
        match input.handle(key) {
            InputResult::Continue => {}
            InputResult::Cancel => return Ok(None),
            InputResult::Submit => {
                let line = input.value().trim();
                if line.is_empty() {
                    return Ok(None);
                }
                history.record(line);
                return Ok(Some(line.to_string()));
            }
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

    fn typed(text: &str) -> Vec<AppEvent> {
        text.chars().map(|c| AppEvent::Key(key(KeyCode::Char(c)))).collect()
    }

    fn history_of(lines: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new();
        for line in lines {
            history.record(line);
        }
        history
    }

    #[test]
    fn typing_and_editing() {
        let mut input = LineInput::new(&CommandHistory::new());
        for c in "stauts".chars() {
            input.handle(key(KeyCode::Char(c)));
        }
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Delete));
        input.handle(key(KeyCode::Char('t')));
        input.handle(key(KeyCode::Char('u')));
        assert_eq!(input.value(), "status");
        assert_eq!(input.cursor(), 5);
        assert_eq!(input.render_parts(), ("statu", Some('s'), ""));
    }

    #[test]
    fn ctrl_u_clears_line() {
        let mut input = LineInput::new(&CommandHistory::new());
        input.handle(key(KeyCode::Char('x')));
        input.handle(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
        assert_eq!(input.render_parts(), ("", None, ""));
    }

    #[test]
    fn history_recall_walks_back_and_restores_draft() {
        let history = history_of(&["status", "log"]);
        let mut input = LineInput::new(&history);
        input.handle(key(KeyCode::Char('b')));

        input.handle(key(KeyCode::Up));
        assert_eq!(input.value(), "log");
        input.handle(key(KeyCode::Up));
        assert_eq!(input.value(), "status");
        input.handle(key(KeyCode::Up));
        assert_eq!(input.value(), "status");

        input.handle(key(KeyCode::Down));
        assert_eq!(input.value(), "log");
        input.handle(key(KeyCode::Down));
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn history_skips_blank_and_repeated_lines() {
        let history = history_of(&["status", "status", "  ", "log"]);
        assert_eq!(history.entries(), ["status", "log"]);
    }

    #[test]
    fn line_length_is_capped() {
        let mut input = LineInput::new(&CommandHistory::new());
        for _ in 0..300 {
            input.handle(key(KeyCode::Char('a')));
        }
        assert_eq!(input.value().len(), MAX_LINE_CHARS);
    }

    #[test]
    fn read_line_submits_and_records() {
        let mut events: VecDeque<AppEvent> = typed("  branch -a ").into();
        events.push_back(AppEvent::Key(key(KeyCode::Enter)));
        let mut history = CommandHistory::new();

        let line = read_line(&mut history, &mut events, |_| Ok(())).unwrap();
        assert_eq!(line.as_deref(), Some("branch -a"));
        assert_eq!(history.entries(), ["branch -a"]);
    }

    #[test]
    fn read_line_escape_cancels_without_recording() {
        let mut events: VecDeque<AppEvent> = typed("log").into();
        events.push_back(AppEvent::Key(key(KeyCode::Esc)));
        let mut history = CommandHistory::new();

        assert_eq!(read_line(&mut history, &mut events, |_| Ok(())).unwrap(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn read_line_blank_submit_is_none() {
        let mut events: VecDeque<AppEvent> = typed("   ").into();
        events.push_back(AppEvent::Key(key(KeyCode::Enter)));
        let mut history = CommandHistory::new();
        assert_eq!(read_line(&mut history, &mut events, |_| Ok(())).unwrap(), None);
    }

    #[test]
    fn read_line_redraws_after_resize() {
        let mut events: VecDeque<AppEvent> = VecDeque::new();
        events.push_back(AppEvent::Resize(40, 12));
        events.push_back(AppEvent::Key(key(KeyCode::Esc)));
        let mut draws = 0;
        read_line(&mut CommandHistory::new(), &mut events, |_| {
            draws += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(draws, 2);
    }
}
