//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::directory::{User, UserDirectory};
use crate::core::state::App;
use crate::core::store::ConversationStore;

/// Timestamp returned by `fixed_clock` (2024-01-01T00:00:00Z).
pub const FIXED_TIME: i64 = 1_704_067_200_000;

pub fn fixed_clock() -> i64 {
    FIXED_TIME
}

/// A store whose messages are all stamped `FIXED_TIME`.
pub fn test_store() -> ConversationStore {
    ConversationStore::new().with_clock(fixed_clock)
}

/// Five users from a fixed seed.
pub fn test_directory() -> UserDirectory {
    UserDirectory::generate(5, Some(1234))
}

pub fn test_users(count: usize) -> Vec<User> {
    UserDirectory::generate(count, Some(1234)).users().to_vec()
}

/// Creates a test App over `test_directory()` with no snapshot file.
pub fn test_app() -> App {
    App::new(test_directory(), test_store())
}
