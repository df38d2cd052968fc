use chrono::Utc;
use serde::{Deserialize, Serialize};

use common::Nickname;
use super::Player;

/// The whole player table, as held in memory and written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTable {
    next_id: u64,
    players: Vec<Player>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            players: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, nickname: &Nickname) -> Option<&Player> {
        self.players.iter().find(|p| p.nickname == nickname.as_str())
    }

    /// Returns the player and whether it was created by this call.
    pub fn find_or_create(&mut self, nickname: &Nickname) -> (Player, bool) {
        if let Some(player) = self.get(nickname) {
            return (player.clone(), false);
        }

        // Tables written before ids were tracked start from the highest id in use.
        let highest = self.players.iter().map(|p| p.id).max().unwrap_or(0);
        let id = self.next_id.max(highest + 1);
        self.next_id = id + 1;

        let player = Player {
            id,
            nickname: nickname.as_str().to_string(),
            wins: 0,
            created_at: Utc::now(),
        };
        self.players.push(player.clone());
        (player, true)
    }

    pub fn record_win(&mut self, nickname: &Nickname) -> Option<Player> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.nickname == nickname.as_str())?;
        player.wins = player.wins.saturating_add(1);
        Some(player.clone())
    }

    pub fn leaderboard(&self) -> Vec<Player> {
        let mut players = self.players.clone();
        players.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
        players
    }
}
