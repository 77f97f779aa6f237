//! # User List Component
//!
//! The "Users" tab: every contact in the directory, with a start action for
//! users who have no conversation yet and a marker for those who do.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `UserListState` lives in `TuiState`
//! - `UserList` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::core::directory::{UserDirectory, UserId};
use crate::core::store::ConversationStore;
use crate::tui::event::TuiEvent;

/// Persistent state for the user list.
#[derive(Debug, Default)]
pub struct UserListState {
    pub selected: usize,
    pub list_state: ListState,
}

/// Events emitted by the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListEvent {
    Start(UserId),
}

impl UserListState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        directory: &UserDirectory,
    ) -> Option<UserListEvent> {
        if directory.is_empty() {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(directory.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => directory
                .users()
                .get(self.selected)
                .map(|user| UserListEvent::Start(user.id)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the user list.
pub struct UserList<'a> {
    state: &'a mut UserListState,
    directory: &'a UserDirectory,
    store: &'a ConversationStore,
}

impl<'a> UserList<'a> {
    pub fn new(
        state: &'a mut UserListState,
        directory: &'a UserDirectory,
        store: &'a ConversationStore,
    ) -> Self {
        Self {
            state,
            directory,
            store,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" Users ")
            .border_style(Style::default().fg(Color::DarkGray));

        let items: Vec<ListItem> = self
            .directory
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let started = self.store.has_conversation(user.id);
                let action = if started {
                    Span::styled("✓ Conversation started", Style::default().fg(Color::Cyan))
                } else {
                    Span::styled("Enter: start conversation", Style::default().fg(Color::DarkGray))
                };
                let name_style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", initials(&user.name)), Style::default().fg(Color::Yellow)),
                    Span::styled(user.name.clone(), name_style),
                    Span::raw("  "),
                    action,
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Two-letter avatar stand-in: "Ada Abbott" → "AA".
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_directory, test_store};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_navigation_clamps() {
        let directory = test_directory();
        let mut state = UserListState::new();

        state.handle_event(&TuiEvent::CursorUp, &directory);
        assert_eq!(state.selected, 0);

        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown, &directory);
        }
        assert_eq!(state.selected, directory.len() - 1);
    }

    #[test]
    fn test_submit_starts_selected_user() {
        let directory = test_directory();
        let mut state = UserListState::new();
        state.handle_event(&TuiEvent::CursorDown, &directory);

        let event = state.handle_event(&TuiEvent::Submit, &directory);
        assert_eq!(event, Some(UserListEvent::Start(directory.users()[1].id)));
    }

    #[test]
    fn test_empty_directory_ignores_events() {
        let directory = UserDirectory::default();
        let mut state = UserListState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit, &directory), None);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ada Abbott"), "AA");
        assert_eq!(initials("keiko"), "K");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_render_marks_started_users() {
        let directory = test_directory();
        let mut store = test_store();
        store.start_conversation(&directory.users()[0]);
        let mut state = UserListState::new();

        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|f| UserList::new(&mut state, &directory, &store).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Conversation started"));
        assert!(text.contains("Enter: start conversation"));
        assert!(text.contains(&directory.users()[0].name));
    }
}
