//! # Core Application Logic
//!
//! This module contains Pigeon's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Directory (contacts) │
//!                    │  • Store (threads)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Snapshot  │      │  Threads   │
//!     │  Adapter   │      │   (JSON)   │      │(SharedStore│
//!     │ (ratatui)  │      │            │      │  + Mutex)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`directory`]: `User`, `UserId` and the read-only `UserDirectory`
//! - [`store`]: `ConversationStore`, the only place conversations change
//! - [`state`]: The `App` struct: all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`config`]: Layered configuration
//! - [`session`]: Snapshot save/load

pub mod action;
pub mod config;
pub mod directory;
pub mod session;
pub mod state;
pub mod store;

pub use directory::{User, UserDirectory, UserId};
pub use store::{Conversation, ConversationStore, Message, SharedStore, StoreEvent};
