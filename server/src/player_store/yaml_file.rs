use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use common::{Nickname, log};
use super::{Player, PlayerRepository, PlayerTable, StoreError};

/// Player table persisted as a YAML file. The whole table is rewritten after
/// every change, through a temporary file and a rename.
#[derive(Debug)]
pub struct YamlPlayerStore {
    file_path: PathBuf,
    table: Mutex<PlayerTable>,
}

impl YamlPlayerStore {
    /// Loads the table from `file_path`, starting empty if the file does not
    /// exist yet.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();
        let table = match std::fs::read_to_string(&file_path) {
            Ok(content) if content.trim().is_empty() => PlayerTable::new(),
            Ok(content) => serde_yaml_ng::from_str(&content)?,
            Err(err) if err.kind() == ErrorKind::NotFound => PlayerTable::new(),
            Err(err) => return Err(err.into()),
        };

        log!(
            "Loaded {} players from {}",
            table.len(),
            file_path.display()
        );

        Ok(Self {
            file_path,
            table: Mutex::new(table),
        })
    }

    fn table(&self) -> Result<MutexGuard<'_, PlayerTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn save(&self, table: &PlayerTable) -> Result<(), StoreError> {
        let content = serde_yaml_ng::to_string(table)?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp_path = self.file_path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.file_path)?;
        Ok(())
    }
}

impl PlayerRepository for YamlPlayerStore {
    fn find_or_create(&self, nickname: &Nickname) -> Result<Player, StoreError> {
        let mut table = self.table()?;
        if let Some(player) = table.get(nickname) {
            return Ok(player.clone());
        }

        // The in-memory table only changes once the new table is on disk.
        let mut updated = table.clone();
        let (player, _) = updated.find_or_create(nickname);
        self.save(&updated)?;
        *table = updated;

        log!("Registered player {} (id {})", player.nickname, player.id);
        Ok(player)
    }

    fn get(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError> {
        Ok(self.table()?.get(nickname).cloned())
    }

    fn record_win(&self, nickname: &Nickname) -> Result<Option<Player>, StoreError> {
        let mut table = self.table()?;
        let mut updated = table.clone();
        let Some(player) = updated.record_win(nickname) else {
            return Ok(None);
        };
        self.save(&updated)?;
        *table = updated;
        Ok(Some(player))
    }

    fn leaderboard(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.table()?.leaderboard())
    }
}
