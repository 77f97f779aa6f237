//! # TabBar Component
//!
//! Bottom navigation between the Users and Conversations tabs. The
//! Conversations label carries a count badge.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Users,
    Conversations,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Users => Tab::Conversations,
            Tab::Conversations => Tab::Users,
        }
    }
}

pub struct TabBar {
    pub selected: Tab,
    pub conversation_count: usize,
}

impl TabBar {
    fn labels(&self) -> [(Tab, String); 2] {
        [
            (Tab::Users, " Users ".to_string()),
            (
                Tab::Conversations,
                format!(" Conversations [{}] ", self.conversation_count),
            ),
        ]
    }
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (tab, label) in self.labels() {
            let style = if tab == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            " Tab switch  Ctrl+S save  Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Line::from(spans), area);
    }
}
