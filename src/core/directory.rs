//! # User Directory
//!
//! The fixed list of contacts a session can talk to. Generated once at startup
//! (or restored from a snapshot) and never mutated afterwards.
//!
//! Generation is seedable so a directory can be reproduced exactly:
//! `UserDirectory::generate(5, Some(42))` yields the same five users every run.

use std::collections::HashSet;
use std::fmt;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default directory size (matches the prototype's five synthetic contacts).
pub const DEFAULT_USER_COUNT: usize = 5;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Camille", "Dmitri", "Elena", "Farah", "Gustavo", "Hana", "Ivan", "Jonas",
    "Keiko", "Luis", "Maya", "Nikolai", "Olga", "Priya", "Quentin", "Rosa", "Samir", "Tereza",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Becker", "Castillo", "Dubois", "Eriksen", "Fischer", "Gallagher", "Horvat",
    "Ibarra", "Jensen", "Kowalski", "Lindqvist", "Moreau", "Novak", "Okafor", "Petrov",
];

/// Opaque, unique user identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A contact. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        let id = UserId::new_v4();
        Self {
            id,
            name: name.into(),
            avatar: avatar_url(id),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("duplicate user id {0}")]
    DuplicateUser(UserId),
}

/// Read-only, ordered list of users with unique ids.
#[derive(Clone, Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Generate `count` synthetic users. A `seed` makes the output reproducible.
    pub fn generate(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate_with(count, &mut rng)
    }

    pub fn generate_with<R: Rng>(count: usize, rng: &mut R) -> Self {
        let users: Vec<User> = (0..count)
            .map(|_| {
                let id = UserId::from_rng(rng);
                let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
                let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
                User {
                    id,
                    name: format!("{first} {last}"),
                    avatar: avatar_url(id),
                }
            })
            .collect();
        debug!("Generated directory with {} users", users.len());
        Self { users }
    }

    /// Build a directory from existing records, refusing duplicate ids.
    pub fn from_users(users: Vec<User>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.id) {
                return Err(DirectoryError::DuplicateUser(user.id));
            }
        }
        Ok(Self { users })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<'a> IntoIterator for &'a UserDirectory {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

fn avatar_url(id: UserId) -> String {
    format!("https://i.pravatar.cc/150?u={id}")
}
