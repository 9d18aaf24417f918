use async_trait::async_trait;
use types::{GameType, PlayerNames, Round, SwordmasterCost, VpSource};
use uuid::Uuid;

use crate::models::{
    DeletedRecord, GameRecord, HighCouncilRecord, SwordmasterRecord, VictoryPointRecord,
};
use crate::DatabaseError;

/// Row-level access to the tracker tables.
///
/// Lookups by id return `Ok(None)` when nothing matched; deciding whether that
/// is an error is left to the caller. Lists come back ordered by round, then
/// timestamp, then id.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn insert_game(
        &self,
        game_type: GameType,
        players: &PlayerNames,
    ) -> Result<GameRecord, DatabaseError>;
    async fn find_game(&self, game_id: Uuid) -> Result<Option<GameRecord>, DatabaseError>;
    /// Removes the game and, through the foreign keys, all of its events.
    async fn delete_game(&self, game_id: Uuid) -> Result<Option<Uuid>, DatabaseError>;

    async fn insert_victory_point(
        &self,
        game_id: Uuid,
        player_name: &str,
        source: VpSource,
        round: Round,
    ) -> Result<VictoryPointRecord, DatabaseError>;
    async fn update_victory_point_source(
        &self,
        vp_id: Uuid,
        source: VpSource,
    ) -> Result<Option<VictoryPointRecord>, DatabaseError>;
    async fn delete_victory_point(
        &self,
        vp_id: Uuid,
    ) -> Result<Option<DeletedRecord>, DatabaseError>;
    async fn find_victory_point(
        &self,
        vp_id: Uuid,
    ) -> Result<Option<VictoryPointRecord>, DatabaseError>;
    /// Removes every VP in the game carrying `source`.
    async fn delete_victory_points_by_source(
        &self,
        game_id: Uuid,
        source: VpSource,
    ) -> Result<Vec<DeletedRecord>, DatabaseError>;
    async fn find_victory_point_by_source(
        &self,
        game_id: Uuid,
        source: VpSource,
    ) -> Result<Option<Uuid>, DatabaseError>;
    async fn list_victory_points(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<VictoryPointRecord>, DatabaseError>;

    async fn find_high_council(
        &self,
        game_id: Uuid,
        player_name: &str,
    ) -> Result<Option<Uuid>, DatabaseError>;
    async fn insert_high_council(
        &self,
        game_id: Uuid,
        player_name: &str,
        round: Round,
    ) -> Result<HighCouncilRecord, DatabaseError>;
    async fn delete_high_council(&self, id: Uuid) -> Result<Option<DeletedRecord>, DatabaseError>;
    async fn list_high_councils(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<HighCouncilRecord>, DatabaseError>;

    async fn find_swordmaster(
        &self,
        game_id: Uuid,
        player_name: &str,
    ) -> Result<Option<Uuid>, DatabaseError>;
    async fn insert_swordmaster(
        &self,
        game_id: Uuid,
        player_name: &str,
        round: Round,
        cost: SwordmasterCost,
    ) -> Result<SwordmasterRecord, DatabaseError>;
    async fn delete_swordmaster(&self, id: Uuid) -> Result<Option<DeletedRecord>, DatabaseError>;
    async fn list_swordmasters(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<SwordmasterRecord>, DatabaseError>;
}
