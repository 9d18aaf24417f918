use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use types::{GameType, DEFAULT_PLAYER_NAMES};

use crate::error::ConfigError;

/// Settings read from the optional YAML config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub database_url: Option<String>,
    pub default_players: Vec<String>,
    pub turn_duration_secs: u64,
    pub default_game_type: GameType,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            default_players: DEFAULT_PLAYER_NAMES.iter().map(|s| s.to_string()).collect(),
            turn_duration_secs: 90,
            default_game_type: GameType::Base,
        }
    }
}

impl TrackerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads `path` if given, otherwise falls back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                let config = Self::from_yaml_str(&contents)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn turn_duration(&self) -> Duration {
        Duration::from_secs(self.turn_duration_secs)
    }
}
