use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::{GameType, PlayerNames, Round, SwordmasterCost, VpSource};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub game_type: GameType,
    pub players: PlayerNames,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictoryPointRecord {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_name: String,
    pub source: VpSource,
    pub round: Round,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighCouncilRecord {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_name: String,
    pub round: Round,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwordmasterRecord {
    pub id: Uuid,
    pub game_id: Uuid,
    pub player_name: String,
    pub round: Round,
    pub cost: SwordmasterCost,
    pub timestamp: DateTime<Utc>,
}

/// What a delete hands back: enough to know which game page went stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    pub id: Uuid,
    pub game_id: Uuid,
}

/// Child rows are displayed by round, then timestamp, then id.
pub trait Chronological {
    fn order_key(&self) -> (Round, DateTime<Utc>, Uuid);
}

impl Chronological for VictoryPointRecord {
    fn order_key(&self) -> (Round, DateTime<Utc>, Uuid) {
        (self.round, self.timestamp, self.id)
    }
}

impl Chronological for HighCouncilRecord {
    fn order_key(&self) -> (Round, DateTime<Utc>, Uuid) {
        (self.round, self.timestamp, self.id)
    }
}

impl Chronological for SwordmasterRecord {
    fn order_key(&self) -> (Round, DateTime<Utc>, Uuid) {
        (self.round, self.timestamp, self.id)
    }
}

pub fn sort_chronologically<T: Chronological>(records: &mut [T]) {
    records.sort_by_key(|record| record.order_key());
}
