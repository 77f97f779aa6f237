//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar
//! - `TabBar`: Bottom navigation with the conversation count badge
//! - `Notice`: Self-dismissing toast
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `UserList`: Directory listing with the start-conversation action
//! - `ConversationList`: Conversation cards with disclosure and composer
//! - `Composer`: Message input
//!
//! Stateful components follow the persistent state + transient wrapper
//! pattern: the `*State` struct lives in `TuiState`, the wrapper is built each
//! frame with borrowed state and props.
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── title_bar.rs
//! ├── tab_bar.rs
//! ├── notice.rs
//! ├── user_list.rs
//! ├── conversation_list.rs
//! └── composer.rs
//! ```

pub mod composer;
pub mod conversation_list;
pub mod notice;
pub mod tab_bar;
pub mod title_bar;
pub mod user_list;

pub use composer::{Composer, ComposerEvent};
pub use conversation_list::{ConversationEvent, ConversationList, ConversationListState};
pub use notice::Notice;
pub use tab_bar::{Tab, TabBar};
pub use title_bar::TitleBar;
pub use user_list::{UserList, UserListEvent, UserListState};
