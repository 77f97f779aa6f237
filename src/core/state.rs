//! # Application State
//!
//! Core business state for Pigeon. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── directory: UserDirectory        // read-only contacts
//! ├── store: ConversationStore        // conversations + messages
//! ├── status_message: String          // status bar text
//! ├── snapshot_path: Option<PathBuf>  // where the session is saved
//! └── autosave: bool                  // save on quit
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::path::PathBuf;

use log::warn;

use crate::core::config::ResolvedConfig;
use crate::core::directory::UserDirectory;
use crate::core::session;
use crate::core::store::ConversationStore;

pub struct App {
    pub directory: UserDirectory,
    pub store: ConversationStore,
    pub status_message: String,
    pub snapshot_path: Option<PathBuf>,
    pub autosave: bool,
}

impl App {
    pub fn new(directory: UserDirectory, store: ConversationStore) -> Self {
        Self {
            directory,
            store,
            status_message: String::from("Welcome to Pigeon!"),
            snapshot_path: None,
            autosave: false,
        }
    }

    /// Build the session from resolved config: restore the snapshot when one
    /// is present, valid, and agrees with any requested user count or seed.
    /// Otherwise generate a fresh directory.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let restored = config.snapshot_path.as_deref().and_then(|path| {
            match session::load(path).and_then(|s| s.map(session::restore).transpose()) {
                Ok(Some((directory, _))) if !directory_matches(&directory, config) => {
                    warn!(
                        "Ignoring snapshot {}: it holds {} users, but {} users (seed {:?}) were requested",
                        path.display(),
                        directory.len(),
                        config.user_count,
                        config.seed
                    );
                    None
                }
                Ok(restored) => restored,
                Err(e) => {
                    warn!("Ignoring snapshot {}: {}", path.display(), e);
                    None
                }
            }
        });

        let mut app = match restored {
            Some((directory, store)) => {
                let mut app = Self::new(directory, store);
                app.status_message = format!("Restored {} conversations", app.store.len());
                app
            }
            None => Self::new(
                UserDirectory::generate(config.user_count, config.seed),
                ConversationStore::new(),
            ),
        };
        app.snapshot_path = config.snapshot_path.clone();
        app.autosave = config.autosave;
        app
    }
}

/// A restored directory only stands in for a requested one when it is the
/// directory those settings would generate.
fn directory_matches(directory: &UserDirectory, config: &ResolvedConfig) -> bool {
    if !config.directory_requested {
        return true;
    }
    if directory.len() != config.user_count {
        return false;
    }
    match config.seed {
        Some(seed) => {
            UserDirectory::generate(config.user_count, Some(seed)).users() == directory.users()
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_NOTICE_MS;
    use crate::core::directory::DEFAULT_USER_COUNT;
    use crate::test_support::test_app;

    fn config_with(snapshot_path: Option<PathBuf>) -> ResolvedConfig {
        ResolvedConfig {
            user_count: 4,
            seed: Some(11),
            directory_requested: true,
            snapshot_path,
            autosave: true,
            notice_ms: DEFAULT_NOTICE_MS,
        }
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Pigeon!");
        assert!(app.store.is_empty());
        assert!(!app.autosave);
    }

    #[test]
    fn test_from_config_without_snapshot_generates_directory() {
        let app = App::from_config(&config_with(None));
        assert_eq!(app.directory.len(), 4);
        assert!(app.store.is_empty());
        assert!(app.autosave);
    }

    #[test]
    fn test_from_config_restores_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let mut first = App::from_config(&config_with(Some(path.clone())));
        let user = first.directory.users()[0].clone();
        first.store.start_conversation(&user);
        first.store.send_message(&user, "saved");
        session::save_current_session(&first);

        let second = App::from_config(&config_with(Some(path)));
        assert_eq!(second.directory.users(), first.directory.users());
        assert_eq!(second.store.conversations(), first.store.conversations());
        assert_eq!(second.status_message, "Restored 1 conversations");
    }

    fn saved_session(path: PathBuf) -> App {
        let mut app = App::from_config(&config_with(Some(path)));
        let user = app.directory.users()[0].clone();
        app.store.start_conversation(&user);
        session::save_current_session(&app);
        app
    }

    #[test]
    fn test_requested_user_count_beats_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        saved_session(path.clone());

        let mut config = config_with(Some(path));
        config.user_count = 2;
        let app = App::from_config(&config);
        assert_eq!(app.directory.len(), 2);
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_requested_seed_beats_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let first = saved_session(path.clone());

        let mut config = config_with(Some(path));
        config.seed = Some(12);
        let app = App::from_config(&config);
        assert_eq!(app.directory.len(), 4);
        assert_ne!(app.directory.users(), first.directory.users());
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_unrequested_directory_restores_any_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let first = saved_session(path.clone());

        let config = ResolvedConfig {
            user_count: DEFAULT_USER_COUNT,
            seed: None,
            directory_requested: false,
            ..config_with(Some(path))
        };
        let app = App::from_config(&config);
        assert_eq!(app.directory.users(), first.directory.users());
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_from_config_ignores_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ broken").unwrap();

        let app = App::from_config(&config_with(Some(path)));
        assert_eq!(app.directory.len(), 4);
        assert!(app.store.is_empty());
    }
}
