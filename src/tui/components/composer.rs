//! # Composer Component
//!
//! Single-line message input shown inside an expanded conversation.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, backspace)
//! - Handle submission (Enter)
//! - Display the buffer with a cursor
//!
//! Submission is not validated: an empty buffer submits an empty message,
//! and the store keeps it as such.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

/// Text input for the focused conversation.
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Byte offset of the cursor within `buffer`
#[derive(Debug, Default)]
pub struct Composer {
    pub buffer: String,
    cursor: usize,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height the composer occupies, borders included.
    pub const HEIGHT: u16 = 3;
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("Type a message... (Enter to send)");

        let (text, style) = if self.buffer.is_empty() {
            (
                "",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )
        } else {
            (self.buffer.as_str(), Style::default().fg(Color::Green))
        };

        // Keep the cursor in view by scrolling horizontally
        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.buffer[..self.cursor].chars().count() as u16;
        let scroll_x = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let input = Paragraph::new(text)
            .block(block)
            .style(style)
            .scroll((0, scroll_x));
        frame.render_widget(input, area);

        frame.set_cursor_position((area.x + 1 + cursor_col - scroll_x, area.y + 1));
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line input: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(ComposerEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(ComposerEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(ComposerEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_handle_input() {
        let mut composer = Composer::new();

        let res = composer.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(ComposerEvent::ContentChanged));
        composer.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(composer.buffer, "aé");

        let res = composer.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(ComposerEvent::ContentChanged));
        assert_eq!(composer.buffer, "a");
    }

    #[test]
    fn test_backspace_on_empty_is_none() {
        let mut composer = Composer::new();
        assert_eq!(composer.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut composer = Composer::new();
        composer.handle_event(&TuiEvent::Paste("hello\nthere".to_string()));

        let res = composer.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(ComposerEvent::Submit("hello there".to_string())));
        assert!(composer.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_submit_empty_is_allowed() {
        let mut composer = Composer::new();
        let res = composer.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(ComposerEvent::Submit(String::new())));
    }

    #[test]
    fn test_render_shows_buffer() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut composer = Composer::new();
        for c in "ping".chars() {
            composer.handle_event(&TuiEvent::InputChar(c));
        }

        terminal
            .draw(|f| {
                composer.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("ping"));
        assert!(text.contains("Type a message"));
    }
}
