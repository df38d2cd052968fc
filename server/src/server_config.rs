use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::tictactoe::BotType;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "tictactoe_server_config.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_PLAYERS_FILE: &str = "players.yaml";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "ttt_session";
pub const CLEANUP_CHECK_INTERVAL: Duration = Duration::from_secs(300);
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(3600);

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub players_file: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub bot: BotType,
    pub session_cookie_name: String,
    pub session_ttl_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.bind_address
            .parse()
            .map_err(|e| format!("Invalid bind address {:?}: {}", self.bind_address, e))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            players_file: PathBuf::from(DEFAULT_PLAYERS_FILE),
            static_dir: None,
            bot: BotType::Minimax,
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_ttl_secs: INACTIVITY_TIMEOUT.as_secs(),
            cleanup_interval_secs: CLEANUP_CHECK_INTERVAL.as_secs(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;

        if self.players_file.as_os_str().is_empty() {
            return Err("Players file path cannot be empty".to_string());
        }

        let cookie_name_is_token = !self.session_cookie_name.is_empty()
            && self
                .session_cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !cookie_name_is_token {
            return Err(format!(
                "Session cookie name {:?} must be non-empty and use only letters, digits, '_' or '-'",
                self.session_cookie_name
            ));
        }

        if self.session_ttl_secs == 0 {
            return Err("Session TTL must be positive".to_string());
        }
        if self.cleanup_interval_secs == 0 {
            return Err("Cleanup interval must be positive".to_string());
        }
        Ok(())
    }
}
