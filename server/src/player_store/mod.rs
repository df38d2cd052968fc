//! Player records and the leaderboard.
//!
//! Handlers only see [`PlayerRepository`]; the server runs on
//! [`YamlPlayerStore`] and tests use [`InMemoryPlayerStore`].

mod in_memory;
mod player_table;
mod yaml_file;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use common::Nickname;

pub use in_memory::InMemoryPlayerStore;
pub use player_table::PlayerTable;
pub use yaml_file::YamlPlayerStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    pub nickname: String,
    pub wins: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_yaml_ng::Error),
    LockPoisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StoreError::LockPoisoned => write!(f, "Player table lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(e) => Some(e),
            StoreError::LockPoisoned => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for StoreError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        StoreError::Serialization(e)
    }
}

pub trait PlayerRepository: Send + Sync {
    /// Returns the player with this nickname, registering it with zero wins
    /// if it is new.
    fn find_or_create(&self, nickname: &Nickname) -> Result<Player, StoreError>;

    fn get(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError>;

    /// Adds one win. `None` if the nickname was never registered.
    fn record_win(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError>;

    /// Most wins first; equal win counts keep registration order.
    fn leaderboard(&self) -> Result<Vec<Player>, StoreError>;
}
