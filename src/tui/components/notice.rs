//! # Notice Component
//!
//! A one-line toast ("Conversation created!") that dismisses itself after a
//! fixed duration. Purely cosmetic; nothing in the core depends on it.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::component::Component;

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    shown_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn new(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }
}

impl Component for Notice {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = (self.text.chars().count() as u16 + 4).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let toast = Rect::new(x, area.y, width, area.height.min(1));

        frame.render_widget(Clear, toast);
        let paragraph = Paragraph::new(self.text.as_str())
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(paragraph, toast);
    }
}
