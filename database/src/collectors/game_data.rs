use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use types::{PlayerNames, Round};

use crate::models::{GameRecord, HighCouncilRecord, SwordmasterRecord, VictoryPointRecord};

/// Everything one player has scored in a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerVpData {
    pub vps: Vec<VictoryPointRecord>,
    pub high_council: Option<HighCouncilRecord>,
    pub swordmaster: Option<SwordmasterRecord>,
    pub total: usize,
}

impl PlayerVpData {
    pub fn last_round(&self) -> Option<Round> {
        self.vps.iter().map(|vp| vp.round).max()
    }
}

/// A game together with its events grouped by player name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub game: GameRecord,
    pub by_player: BTreeMap<String, PlayerVpData>,
}

impl GameData {
    pub fn players(&self) -> &PlayerNames {
        &self.game.players
    }

    pub fn player(&self, name: &str) -> Option<&PlayerVpData> {
        self.by_player.get(name)
    }

    /// Player names in seat order, followed by any names only found on events.
    pub fn player_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.players().iter() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        for name in self.by_player.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}
