//! # Session Snapshots
//!
//! Optional persistence of a whole session as one JSON document:
//!
//! ```text
//! { "users": [User], "conversations": [Conversation] }
//! ```
//!
//! Only used when a snapshot file is configured. Writes use atomic rename
//! (write `.tmp`, then `rename()`) for crash safety.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::directory::{DirectoryError, User, UserDirectory};
use crate::core::state::App;
use crate::core::store::{Conversation, ConversationStore};

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

impl From<DirectoryError> for SnapshotError {
    fn from(e: DirectoryError) -> Self {
        SnapshotError::Invalid(e.to_string())
    }
}

/// Copy the directory and store into a serializable record.
pub fn capture(directory: &UserDirectory, store: &ConversationStore) -> Snapshot {
    Snapshot {
        users: directory.users().to_vec(),
        conversations: store.conversations().to_vec(),
    }
}

/// Rebuild a directory and store, checking the same invariants the store
/// enforces at runtime.
pub fn restore(snapshot: Snapshot) -> Result<(UserDirectory, ConversationStore), SnapshotError> {
    let directory = UserDirectory::from_users(snapshot.users)?;

    let mut seen = HashSet::with_capacity(snapshot.conversations.len());
    for conversation in &snapshot.conversations {
        let id = conversation.id();
        if !seen.insert(id) {
            return Err(SnapshotError::Invalid(format!(
                "more than one conversation for user {id}"
            )));
        }
        match directory.get(id) {
            None => {
                return Err(SnapshotError::Invalid(format!(
                    "conversation for unknown user {id}"
                )));
            }
            Some(user) if *user != conversation.user => {
                return Err(SnapshotError::Invalid(format!(
                    "conversation user {id} differs from the directory entry"
                )));
            }
            Some(_) => {}
        }
        if let Some(stray) = conversation.messages.iter().find(|m| m.recipient != id) {
            return Err(SnapshotError::Invalid(format!(
                "message for {} filed under conversation {id}",
                stray.recipient
            )));
        }
    }

    Ok((
        directory,
        ConversationStore::from_conversations(snapshot.conversations),
    ))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    atomic_write_json(path, snapshot)?;
    debug!(
        "Snapshot saved to {} ({} users, {} conversations)",
        path.display(),
        snapshot.users.len(),
        snapshot.conversations.len()
    );
    Ok(())
}

/// Load a snapshot. A missing file is not an error.
pub fn load(path: &Path) -> Result<Option<Snapshot>, SnapshotError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;
    info!(
        "Loaded snapshot from {} ({} users, {} conversations)",
        path.display(),
        snapshot.users.len(),
        snapshot.conversations.len()
    );
    Ok(Some(snapshot))
}

/// Save the running session to its snapshot path, if it has one. Failures
/// are logged, not returned: losing a snapshot must not block quitting.
pub fn save_current_session(app: &App) {
    let Some(path) = app.snapshot_path.as_deref() else {
        debug!("No snapshot path, not saving");
        return;
    };

    let snapshot = capture(&app.directory, &app.store);
    if let Err(e) = save(path, &snapshot) {
        warn!("Failed to save snapshot: {}", e);
    }
}
