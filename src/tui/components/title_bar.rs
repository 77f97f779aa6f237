//! # TitleBar Component
//!
//! Top status bar: app name and the latest status message.
//!
//! Stateless: it receives all data as props and renders what it's given.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub status_message: String,
}

impl TitleBar {
    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            "Pigeon".to_string()
        } else {
            format!("Pigeon | {}", self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
