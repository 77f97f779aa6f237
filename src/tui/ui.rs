use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ConversationList, Tab, TabBar, TitleBar, UserList};

/// Screen regions: status line, active tab, toast row, tab bar.
fn layout(area: Rect) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(1), Length(1)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let [title_area, main_area, notice_area, tab_area] = layout(frame.area());

    TitleBar {
        status_message: app.status_message.clone(),
    }
    .render(frame, title_area);

    match tui.tab {
        Tab::Users => {
            UserList::new(&mut tui.users, &app.directory, &app.store).render(frame, main_area)
        }
        Tab::Conversations => {
            ConversationList::new(&mut tui.conversations, &app.store).render(frame, main_area)
        }
    }

    if let Some(notice) = tui.notice.as_mut() {
        notice.render(frame, notice_area);
    }

    TabBar {
        selected: tui.tab,
        conversation_count: app.store.len(),
    }
    .render(frame, tab_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use crate::tui::components::Notice;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_users_tab() {
        let app = test_app();
        let mut tui = TuiState::new(Duration::from_secs(1));
        let text = draw(&app, &mut tui);
        assert!(text.contains("Welcome to Pigeon!"));
        assert!(text.contains(&app.directory.users()[0].name));
        assert!(text.contains("Conversations [0]"));
    }

    #[test]
    fn test_draw_conversations_tab_with_notice() {
        let mut app = test_app();
        let user = app.directory.users()[2].clone();
        app.store.start_conversation(&user);

        let mut tui = TuiState::new(Duration::from_secs(1));
        tui.tab = Tab::Conversations;
        tui.notice = Some(Notice::new("Conversation created!", Duration::from_secs(1)));

        let text = draw(&app, &mut tui);
        assert!(text.contains(&user.name));
        assert!(text.contains("No messages"));
        assert!(text.contains("Conversation created!"));
        assert!(text.contains("Conversations [1]"));
    }

    #[test]
    fn test_layout_regions() {
        let [title, main, notice, tabs] = layout(Rect::new(0, 0, 80, 24));
        assert_eq!(title.height, 1);
        assert_eq!(main.height, 21);
        assert_eq!(notice.y, 22);
        assert_eq!(tabs.y, 23);
    }
}
