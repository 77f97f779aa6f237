//! # Conversation Store
//!
//! Session-scoped collection of conversations, one per user at most.
//!
//! ```text
//! ConversationStore
//! ├── conversations: Vec<Conversation>   // first-started order
//! │   ├── user: User                      // copied from the directory
//! │   └── messages: Vec<Message>          // append-only
//! ├── revision: u64                       // bumped on every mutation
//! └── subscribers: Vec<Sender<StoreEvent>>
//! ```
//!
//! `start_conversation` and `send_message` are the only ways to mutate it.
//! Consumers redraw on `revision()` changes, listen on `subscribe()`, or take
//! an owned `snapshot()`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::directory::{User, UserId};

/// Source of message timestamps, in epoch milliseconds.
pub type Clock = fn() -> i64;

fn wall_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A single message. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub recipient: UserId,
    pub content: String,
    /// Informational only; ordering is by insertion.
    pub timestamp: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub user: User,
    pub messages: Vec<Message>,
}

impl Conversation {
    fn new(user: &User) -> Self {
        Self {
            user: user.clone(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Result of `start_conversation`.
#[derive(Debug)]
pub struct Started<'a> {
    pub conversation: &'a Conversation,
    /// False when the conversation already existed.
    pub created: bool,
}

/// Change notification sent to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    ConversationStarted { user: UserId },
    MessageAppended { user: UserId, index: usize },
}

/// Owned, immutable copy of the store at a given revision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub conversations: Vec<Conversation>,
}

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    revision: u64,
    clock: Clock,
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStore")
            .field("conversations", &self.conversations.len())
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            revision: 0,
            clock: wall_clock,
            subscribers: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Rebuild a store from previously saved conversations.
    ///
    /// The caller is responsible for uniqueness (see `session::restore`).
    pub(crate) fn from_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            ..Self::new()
        }
    }

    /// Start a conversation with `user`, or return the existing one.
    pub fn start_conversation(&mut self, user: &User) -> Started<'_> {
        if let Some(idx) = self.position(user.id) {
            debug!("Conversation with {} already started", user.id);
            return Started {
                conversation: &self.conversations[idx],
                created: false,
            };
        }

        self.conversations.push(Conversation::new(user));
        self.revision += 1;
        debug!(
            "Started conversation with {} ({} total)",
            user.id,
            self.conversations.len()
        );
        self.notify(StoreEvent::ConversationStarted { user: user.id });

        let conversation = &self.conversations[self.conversations.len() - 1];
        Started {
            conversation,
            created: true,
        }
    }

    /// Append a message to `user`'s conversation.
    ///
    /// Returns `None` without touching the store when no conversation exists.
    pub fn send_message(&mut self, user: &User, content: impl Into<String>) -> Option<&Message> {
        let Some(idx) = self.position(user.id) else {
            debug!("Dropping message to {}: no conversation", user.id);
            return None;
        };

        let message = Message {
            recipient: user.id,
            content: content.into(),
            timestamp: (self.clock)(),
        };
        let messages = &mut self.conversations[idx].messages;
        messages.push(message);
        let index = messages.len() - 1;
        self.revision += 1;
        debug!("Appended message #{} to conversation with {}", index, user.id);
        self.notify(StoreEvent::MessageAppended {
            user: user.id,
            index,
        });

        self.conversations[idx].messages.last()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: UserId) -> Option<&Conversation> {
        self.position(id).map(|idx| &self.conversations[idx])
    }

    pub fn has_conversation(&self, id: UserId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            conversations: self.conversations.clone(),
        }
    }

    /// Receive a `StoreEvent` for every subsequent mutation.
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn position(&self, id: UserId) -> Option<usize> {
        self.conversations.iter().position(|c| c.user.id == id)
    }

    fn notify(&mut self, event: StoreEvent) {
        // Dropped receivers fail the send and are pruned here.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// A store shared between threads. Each operation holds the lock for its
/// whole read-modify-write.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<ConversationStore>>,
}

impl SharedStore {
    pub fn new(store: ConversationStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Returns true if this call created the conversation.
    pub fn start_conversation(&self, user: &User) -> bool {
        self.lock().start_conversation(user).created
    }

    pub fn send_message(&self, user: &User, content: impl Into<String>) -> Option<Message> {
        self.lock().send_message(user, content).cloned()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().snapshot()
    }

    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        self.lock().subscribe()
    }

    /// Every mutation completes before the guard is released, so a poisoned
    /// lock still holds a consistent store.
    fn lock(&self) -> MutexGuard<'_, ConversationStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
