//! # Conversation List Component
//!
//! The "Conversations" tab. Each conversation is a card showing the last
//! message; Enter expands a card (disclosure) to reveal the full thread and
//! the composer, Esc collapses it again. Each card keeps its own unsent draft
//! while it is collapsed or another card is selected.
//!
//! Card layout:
//!
//! ```text
//! ┌ Ada Abbott ─────────────────────────┐
//! │Last message: see you tomorrow       │   collapsed: 3 rows
//! │10:02:11  hi                         │
//! │10:05:40  see you tomorrow           │   expanded: + one row per message
//! │╭Type a message...──────────────────╮│   + composer (selected card only)
//! │╰───────────────────────────────────╯│
//! └─────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::directory::UserId;
use crate::core::store::{Conversation, ConversationStore};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::composer::{Composer, ComposerEvent};
use crate::tui::event::TuiEvent;

/// Persistent state for the conversation list.
#[derive(Debug, Default)]
pub struct ConversationListState {
    pub selected: usize,
    pub expanded: HashSet<UserId>,
    drafts: HashMap<UserId, Composer>,
    /// Index of the first card drawn.
    offset: usize,
}

/// Events emitted by the conversation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    Send { user: UserId, content: String },
    Toggled { user: UserId, expanded: bool },
}

impl ConversationListState {
    pub fn new() -> Self {
        Self::default()
    }

    fn selected_id(&self, store: &ConversationStore) -> Option<UserId> {
        store.conversations().get(self.selected).map(Conversation::id)
    }

    /// Unsent text for `id`'s conversation.
    pub fn draft(&self, id: UserId) -> &str {
        self.drafts.get(&id).map_or("", |c| c.buffer.as_str())
    }

    pub fn is_expanded(&self, id: UserId) -> bool {
        self.expanded.contains(&id)
    }

    /// Open or close the disclosure for `id`. Returns the new state.
    pub fn toggle(&mut self, id: UserId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        store: &ConversationStore,
    ) -> Option<ConversationEvent> {
        let id = self.selected_id(store)?;
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(store.len() - 1);
                None
            }
            TuiEvent::Submit if !self.is_expanded(id) => Some(ConversationEvent::Toggled {
                user: id,
                expanded: self.toggle(id),
            }),
            TuiEvent::Escape if self.is_expanded(id) => Some(ConversationEvent::Toggled {
                user: id,
                expanded: self.toggle(id),
            }),
            _ if self.is_expanded(id) => {
                let composer = self.drafts.entry(id).or_default();
                match composer.handle_event(event)? {
                    ComposerEvent::Submit(content) => {
                        Some(ConversationEvent::Send { user: id, content })
                    }
                    ComposerEvent::ContentChanged => None,
                }
            }
            _ => None,
        }
    }

    /// Rows a card needs at full size, capped at `u16::MAX`.
    fn card_height(&self, conversation: &Conversation, is_selected: bool) -> u16 {
        if !self.is_expanded(conversation.id()) {
            return 3;
        }
        let composer = if is_selected { Composer::HEIGHT } else { 0 };
        let thread = u16::try_from(conversation.messages.len()).unwrap_or(u16::MAX);
        3u16.saturating_add(thread).saturating_add(composer)
    }

    /// Move `offset` so the selected card is on screen.
    fn scroll_to_selected(&mut self, store: &ConversationStore, height: u16) {
        let conversations = store.conversations();
        if conversations.is_empty() {
            self.selected = 0;
            self.offset = 0;
            return;
        }
        self.selected = self.selected.min(conversations.len() - 1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        loop {
            let used: u16 = conversations[self.offset..=self.selected]
                .iter()
                .enumerate()
                .map(|(i, c)| self.card_height(c, self.offset + i == self.selected))
                .fold(0, u16::saturating_add);
            if used <= height || self.offset == self.selected {
                break;
            }
            self.offset += 1;
        }
    }
}

/// Transient render wrapper for the conversation list.
pub struct ConversationList<'a> {
    state: &'a mut ConversationListState,
    store: &'a ConversationStore,
}

impl<'a> ConversationList<'a> {
    pub fn new(state: &'a mut ConversationListState, store: &'a ConversationStore) -> Self {
        Self { state, store }
    }
}

impl Component for ConversationList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let store = self.store;
        if store.is_empty() {
            let empty = Paragraph::new("No conversations started")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(empty, area);
            return;
        }

        self.state.scroll_to_selected(store, area.height);

        let mut y = area.y;
        let bottom = area.y + area.height;
        let first = self.state.offset;
        for (index, conversation) in store.conversations().iter().enumerate().skip(first) {
            if y >= bottom {
                break;
            }
            let is_selected = index == self.state.selected;
            let height = self.state.card_height(conversation, is_selected).min(bottom - y);
            let card = Rect::new(area.x, y, area.width, height);
            self.render_card(frame, card, conversation, is_selected);
            y += height;
        }
    }
}

impl ConversationList<'_> {
    fn render_card(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        conversation: &Conversation,
        is_selected: bool,
    ) {
        let expanded = self.state.is_expanded(conversation.id());
        let border_style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if expanded { "▲" } else { "▼" };
        let block = Block::bordered()
            .title(format!(" {} ", conversation.user.name))
            .title_bottom(Line::from(format!(" {marker} ")).right_aligned())
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![summary_line(conversation)];
        if expanded {
            lines.extend(conversation.messages.iter().map(|m| {
                Line::from(vec![
                    Span::styled(
                        format!("{}  ", format_time(m.timestamp)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(m.content.clone()),
                ])
            }));
        }

        let composer_rows = if expanded && is_selected { Composer::HEIGHT } else { 0 };
        let text_height = inner.height.saturating_sub(composer_rows);
        let text_area = Rect::new(inner.x, inner.y, inner.width, text_height);
        frame.render_widget(Paragraph::new(lines), text_area);

        if composer_rows > 0 && inner.height >= composer_rows {
            let composer_area = Rect::new(
                inner.x,
                inner.y + inner.height - composer_rows,
                inner.width,
                composer_rows,
            );
            self.state
                .drafts
                .entry(conversation.id())
                .or_default()
                .render(frame, composer_area);
        }
    }
}

fn summary_line(conversation: &Conversation) -> Line<'static> {
    match conversation.last_message() {
        Some(m) => Line::from(vec![
            Span::styled("Last message: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(m.content.clone()),
        ]),
        None => Line::from(Span::styled(
            "No messages",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    }
}

/// Format an epoch-millis timestamp as local "HH:MM:SS".
fn format_time(ts: i64) -> String {
    use chrono::{DateTime, Local};
    DateTime::from_timestamp_millis(ts)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%H:%M:%S")
        .to_string()
}
