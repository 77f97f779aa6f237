//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop only redraws after input, a store change, or a notice expiring.
//! While a notice is up the poll timeout is short so it disappears on time;
//! otherwise the loop sleeps up to 500ms between polls.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session;
use crate::core::state::App;
use crate::tui::components::{
    ConversationEvent, ConversationListState, Notice, Tab, UserListEvent, UserListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub tab: Tab,
    pub users: UserListState,
    pub conversations: ConversationListState,
    pub notice: Option<Notice>,
    pub notice_ttl: Duration,
}

impl TuiState {
    pub fn new(notice_ttl: Duration) -> Self {
        Self {
            tab: Tab::default(),
            users: UserListState::new(),
            conversations: ConversationListState::new(),
            notice: None,
            notice_ttl,
        }
    }

    /// Route a terminal event to the active tab. Returns the core action it
    /// maps to, if any.
    pub fn dispatch(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::Save => return Some(Action::SaveSnapshot),
            TuiEvent::SwitchTab => {
                self.tab = self.tab.next();
                return None;
            }
            TuiEvent::Resize => return None,
            _ => {}
        }

        match self.tab {
            Tab::Users => match self.users.handle_event(event, &app.directory) {
                Some(UserListEvent::Start(id)) => Some(Action::StartConversation(id)),
                None if matches!(event, TuiEvent::Escape) => Some(Action::Quit),
                None => None,
            },
            Tab::Conversations => match self.conversations.handle_event(event, &app.store) {
                Some(ConversationEvent::Send { user, content }) => {
                    Some(Action::SendMessage { user, content })
                }
                Some(ConversationEvent::Toggled { user, expanded }) => {
                    debug!("Conversation {} expanded={}", user, expanded);
                    None
                }
                None if matches!(event, TuiEvent::Escape) => Some(Action::Quit),
                None => None,
            },
        }
    }

    /// Apply an effect that concerns presentation. Returns true on quit.
    pub fn apply(&mut self, effect: Effect, app: &App) -> bool {
        match effect {
            Effect::Notify(text) => {
                self.notice = Some(Notice::new(text, self.notice_ttl));
                false
            }
            Effect::SaveSnapshot => {
                session::save_current_session(app);
                false
            }
            Effect::Quit => true,
            Effect::None => false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(Duration::from_millis(config.notice_ms));
    let store_events = app.store.subscribe();
    info!(
        "Session ready: {} users, {} conversations",
        app.directory.len(),
        app.store.len()
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if tui.notice.as_ref().is_some_and(Notice::is_expired) {
            tui.notice = None;
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Short timeout while a notice needs dismissing
        let timeout = if tui.notice.is_some() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if let Some(action) = tui.dispatch(&event, &app) {
                let effect = update(&mut app, action);
                if tui.apply(effect, &app) {
                    should_quit = true;
                    break;
                }
            }
        }

        for change in store_events.try_iter() {
            debug!("Store changed: {:?}", change);
            needs_redraw = true;
        }

        if should_quit {
            break;
        }
    }

    if app.autosave {
        session::save_current_session(&app);
    }

    ratatui::restore();
    Ok(())
}
