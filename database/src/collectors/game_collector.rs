use std::collections::BTreeMap;

use uuid::Uuid;

use super::{GameData, PlayerVpData};
use crate::models::{
    sort_chronologically, Chronological, GameRecord, HighCouncilRecord, SwordmasterRecord,
    VictoryPointRecord,
};
use crate::{DatabaseError, TrackerStore};

/// Folds a game's flat event rows into per-player breakdowns.
#[derive(Debug, Clone)]
pub struct GameDataCollector {
    game: GameRecord,
    by_player: BTreeMap<String, PlayerVpData>,
}

impl GameDataCollector {
    pub fn new(game: GameRecord) -> Self {
        let by_player = game
            .players
            .iter()
            .map(|name| (name.to_string(), PlayerVpData::default()))
            .collect();
        Self { game, by_player }
    }

    fn entry(&mut self, player_name: &str) -> &mut PlayerVpData {
        if !self.by_player.contains_key(player_name) {
            tracing::warn!(
                "Game {} has events for unseated player {}",
                self.game.id,
                player_name
            );
        }
        self.by_player.entry(player_name.to_string()).or_default()
    }

    pub fn add_victory_point(&mut self, vp: VictoryPointRecord) {
        let player = self.entry(&vp.player_name);
        player.vps.push(vp);
        player.total += 1;
    }

    /// Keeps the latest record if a player somehow holds more than one.
    pub fn add_high_council(&mut self, record: HighCouncilRecord) {
        let player = self.entry(&record.player_name);
        if is_later(&player.high_council, &record) {
            player.high_council = Some(record);
        }
    }

    pub fn add_swordmaster(&mut self, record: SwordmasterRecord) {
        let player = self.entry(&record.player_name);
        if is_later(&player.swordmaster, &record) {
            player.swordmaster = Some(record);
        }
    }

    pub fn finish(mut self) -> GameData {
        for player in self.by_player.values_mut() {
            sort_chronologically(&mut player.vps);
        }
        GameData {
            game: self.game,
            by_player: self.by_player,
        }
    }
}

fn is_later<T: Chronological>(current: &Option<T>, candidate: &T) -> bool {
    current
        .as_ref()
        .map_or(true, |held| candidate.order_key() >= held.order_key())
}

/// Reads a game and all its events. `Ok(None)` means no such game.
pub async fn fetch_game_data<S>(store: &S, game_id: Uuid) -> Result<Option<GameData>, DatabaseError>
where
    S: TrackerStore + ?Sized,
{
    let Some(game) = store.find_game(game_id).await? else {
        return Ok(None);
    };

    let mut collector = GameDataCollector::new(game);
    for vp in store.list_victory_points(game_id).await? {
        collector.add_victory_point(vp);
    }
    for record in store.list_high_councils(game_id).await? {
        collector.add_high_council(record);
    }
    for record in store.list_swordmasters(game_id).await? {
        collector.add_swordmaster(record);
    }
    Ok(Some(collector.finish()))
}
