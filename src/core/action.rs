//! # Actions
//!
//! Everything that can happen in Pigeon becomes an `Action`.
//! User presses Enter on a contact? That's `Action::StartConversation(id)`.
//! User submits the composer? That's `Action::SendMessage { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` for the adapter to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::directory::UserId;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StartConversation(UserId),
    SendMessage { user: UserId, content: String },
    SaveSnapshot,
    Quit,
}

/// Follow-up work for the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Show a transient notice.
    Notify(String),
    SaveSnapshot,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::StartConversation(id) => {
            let Some(user) = app.directory.get(id) else {
                app.status_message = format!("Unknown user {id}");
                return Effect::None;
            };
            let started = app.store.start_conversation(user);
            if started.created {
                info!("Conversation started with {}", user.name);
                app.status_message = format!("Talking to {}", user.name);
                Effect::Notify("Conversation created!".to_string())
            } else {
                app.status_message = format!("Already talking to {}", user.name);
                Effect::None
            }
        }
        Action::SendMessage { user, content } => {
            let Some(user) = app.directory.get(user) else {
                return Effect::None;
            };
            if app.store.send_message(user, content).is_some() {
                app.status_message = format!("Sent to {}", user.name);
            }
            Effect::None
        }
        Action::SaveSnapshot => Effect::SaveSnapshot,
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_start_conversation_notifies_once() {
        let mut app = test_app();
        let id = app.directory.users()[0].id;

        let effect = update(&mut app, Action::StartConversation(id));
        assert_eq!(effect, Effect::Notify("Conversation created!".to_string()));
        assert!(app.store.has_conversation(id));

        let effect = update(&mut app, Action::StartConversation(id));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.store.len(), 1);
        assert!(app.status_message.starts_with("Already talking to"));
    }

    #[test]
    fn test_start_unknown_user_is_noop() {
        let mut app = test_app();
        let effect = update(&mut app, Action::StartConversation(UserId::new_v4()));
        assert_eq!(effect, Effect::None);
        assert!(app.store.is_empty());
        assert!(app.status_message.starts_with("Unknown user"));
    }

    #[test]
    fn test_send_message_appends() {
        let mut app = test_app();
        let id = app.directory.users()[1].id;
        update(&mut app, Action::StartConversation(id));
        update(
            &mut app,
            Action::SendMessage {
                user: id,
                content: "hello".to_string(),
            },
        );

        let conversation = app.store.conversation(id).unwrap();
        assert_eq!(conversation.messages.len(), 1);
        assert_eq!(conversation.messages[0].content, "hello");
        assert!(app.status_message.starts_with("Sent to"));
    }

    #[test]
    fn test_send_without_conversation_is_noop() {
        let mut app = test_app();
        let id = app.directory.users()[0].id;
        let status = app.status_message.clone();

        let effect = update(
            &mut app,
            Action::SendMessage {
                user: id,
                content: "anyone?".to_string(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.store.is_empty());
        assert_eq!(app.status_message, status);
    }

    #[test]
    fn test_quit_and_save_effects() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
        assert_eq!(update(&mut app, Action::SaveSnapshot), Effect::SaveSnapshot);
    }
}
