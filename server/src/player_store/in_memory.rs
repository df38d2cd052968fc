use std::sync::{Mutex, MutexGuard};

use common::Nickname;
use super::{Player, PlayerRepository, PlayerTable, StoreError};

/// Keeps the table in memory only; everything is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    table: Mutex<PlayerTable>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(PlayerTable::new()),
        }
    }

    fn table(&self) -> Result<MutexGuard<'_, PlayerTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl PlayerRepository for InMemoryPlayerStore {
    fn find_or_create(&self, nickname: &Nickname) -> Result<Player, StoreError> {
        Ok(self.table()?.find_or_create(nickname).0)
    }

    fn get(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError> {
        Ok(self.table()?.get(nickname).cloned())
    }

    fn record_win(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError> {
        Ok(self.table()?.record_win(nickname))
    }

    fn leaderboard(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.table()?.leaderboard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nick(name: &str) -> Nickname {
        Nickname::parse(name).unwrap()
    }

    #[test]
    fn test_unknown_player_is_not_created_by_lookups() {
        let store = InMemoryPlayerStore::new();
        assert!(store.get(&nick("dave")).unwrap().is_none());
        assert!(store.record_win(&nick("dave")).unwrap().is_none());
        assert!(store.leaderboard().unwrap().is_empty());
    }

    #[test]
    fn test_record_win_increments_registered_player() {
        let store = InMemoryPlayerStore::new();
        store.find_or_create(&nick("dave")).unwrap();
        store.record_win(&nick("dave")).unwrap();
        let dave = store.record_win(&nick("dave")).unwrap().unwrap();
        assert_eq!(dave.wins, 2);
        assert_eq!(store.get(&nick("dave")).unwrap(), Some(dave));
    }
}
