use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use types::{GameType, PlayerNames, Round, SwordmasterCost, VpSource};
use uuid::Uuid;

use super::TrackerStore;
use crate::models::{
    DeletedRecord, GameRecord, HighCouncilRecord, SwordmasterRecord, VictoryPointRecord,
};
use crate::DatabaseError;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        tracing::info!("Tracker migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn uuid_column(row: &SqliteRow, column: &'static str) -> Result<Uuid, DatabaseError> {
    let raw: String = row.try_get(column)?;
    Ok(Uuid::parse_str(&raw)?)
}

fn round_column(row: &SqliteRow) -> Result<Round, DatabaseError> {
    let raw: i64 = row.try_get("round")?;
    Round::try_from(raw).map_err(|e| DatabaseError::decode("round", e))
}

fn timestamp_column(row: &SqliteRow) -> Result<DateTime<Utc>, DatabaseError> {
    Ok(row.try_get("timestamp")?)
}

fn game_from_row(row: &SqliteRow) -> Result<GameRecord, DatabaseError> {
    let game_type: String = row.try_get("game_type")?;
    let players = PlayerNames::new([
        row.try_get("p1_name")?,
        row.try_get("p2_name")?,
        row.try_get("p3_name")?,
        row.try_get("p4_name")?,
    ]);
    Ok(GameRecord {
        id: uuid_column(row, "id")?,
        created_at: row.try_get("created_at")?,
        game_type: game_type
            .parse()
            .map_err(|e| DatabaseError::decode("game_type", e))?,
        players,
    })
}

fn victory_point_from_row(row: &SqliteRow) -> Result<VictoryPointRecord, DatabaseError> {
    let source: String = row.try_get("source")?;
    Ok(VictoryPointRecord {
        id: uuid_column(row, "id")?,
        game_id: uuid_column(row, "game_id")?,
        player_name: row.try_get("player_name")?,
        source: source
            .parse()
            .map_err(|e| DatabaseError::decode("source", e))?,
        round: round_column(row)?,
        timestamp: timestamp_column(row)?,
    })
}

fn high_council_from_row(row: &SqliteRow) -> Result<HighCouncilRecord, DatabaseError> {
    Ok(HighCouncilRecord {
        id: uuid_column(row, "id")?,
        game_id: uuid_column(row, "game_id")?,
        player_name: row.try_get("player_name")?,
        round: round_column(row)?,
        timestamp: timestamp_column(row)?,
    })
}

fn swordmaster_from_row(row: &SqliteRow) -> Result<SwordmasterRecord, DatabaseError> {
    let raw: i64 = row.try_get("cost")?;
    let cost = SwordmasterCost::try_from(raw).map_err(|e| DatabaseError::decode("cost", e))?;
    Ok(SwordmasterRecord {
        id: uuid_column(row, "id")?,
        game_id: uuid_column(row, "game_id")?,
        player_name: row.try_get("player_name")?,
        round: round_column(row)?,
        cost,
        timestamp: timestamp_column(row)?,
    })
}

fn deleted_from_row(row: &SqliteRow) -> Result<DeletedRecord, DatabaseError> {
    Ok(DeletedRecord {
        id: uuid_column(row, "id")?,
        game_id: uuid_column(row, "game_id")?,
    })
}

fn acquisition_error(e: sqlx::Error, kind: &'static str, player: &str) -> DatabaseError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::AlreadyAcquired {
            kind,
            player: player.to_string(),
        },
        _ => DatabaseError::Query(e.to_string()),
    }
}

#[async_trait]
impl TrackerStore for SqliteStore {
    async fn insert_game(
        &self,
        game_type: GameType,
        players: &PlayerNames,
    ) -> Result<GameRecord, DatabaseError> {
        let game = GameRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            game_type,
            players: players.clone(),
        };
        let [p1, p2, p3, p4] = game.players.as_array();

        sqlx::query(
            "INSERT INTO dune_game (id, created_at, game_type, p1_name, p2_name, p3_name, p4_name) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(game.id.to_string())
        .bind(game.created_at)
        .bind(game.game_type.as_str())
        .bind(p1)
        .bind(p2)
        .bind(p3)
        .bind(p4)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Inserted game {} for {}", game.id, game.players);
        Ok(game)
    }

    async fn find_game(&self, game_id: Uuid) -> Result<Option<GameRecord>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, created_at, game_type, p1_name, p2_name, p3_name, p4_name FROM dune_game WHERE id = ?",
        )
        .bind(game_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(game_from_row).transpose()
    }

    async fn delete_game(&self, game_id: Uuid) -> Result<Option<Uuid>, DatabaseError> {
        let row = sqlx::query("DELETE FROM dune_game WHERE id = ? RETURNING id")
            .bind(game_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(|r| uuid_column(r, "id")).transpose()
    }

    async fn insert_victory_point(
        &self,
        game_id: Uuid,
        player_name: &str,
        source: VpSource,
        round: Round,
    ) -> Result<VictoryPointRecord, DatabaseError> {
        let vp = VictoryPointRecord {
            id: Uuid::new_v4(),
            game_id,
            player_name: player_name.to_string(),
            source,
            round,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO victory_point_earned (id, game_id, player_name, source, round, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(vp.id.to_string())
        .bind(vp.game_id.to_string())
        .bind(&vp.player_name)
        .bind(vp.source.as_str())
        .bind(i64::from(vp.round.number()))
        .bind(vp.timestamp)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Inserted VP {} ({}) for {} in round {}",
            vp.id,
            vp.source,
            vp.player_name,
            vp.round
        );
        Ok(vp)
    }

    async fn update_victory_point_source(
        &self,
        vp_id: Uuid,
        source: VpSource,
    ) -> Result<Option<VictoryPointRecord>, DatabaseError> {
        let row = sqlx::query(
            "UPDATE victory_point_earned SET source = ? WHERE id = ? RETURNING id, game_id, player_name, source, round, timestamp",
        )
        .bind(source.as_str())
        .bind(vp_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(victory_point_from_row).transpose()
    }

    async fn delete_victory_point(
        &self,
        vp_id: Uuid,
    ) -> Result<Option<DeletedRecord>, DatabaseError> {
        let row = sqlx::query("DELETE FROM victory_point_earned WHERE id = ? RETURNING id, game_id")
            .bind(vp_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(deleted_from_row).transpose()
    }

    async fn find_victory_point(
        &self,
        vp_id: Uuid,
    ) -> Result<Option<VictoryPointRecord>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, game_id, player_name, source, round, timestamp FROM victory_point_earned WHERE id = ?",
        )
        .bind(vp_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(victory_point_from_row).transpose()
    }

    async fn delete_victory_points_by_source(
        &self,
        game_id: Uuid,
        source: VpSource,
    ) -> Result<Vec<DeletedRecord>, DatabaseError> {
        let rows = sqlx::query(
            "DELETE FROM victory_point_earned WHERE game_id = ? AND source = ? RETURNING id, game_id",
        )
        .bind(game_id.to_string())
        .bind(source.as_str())
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Deleted {} {} VPs in game {}", rows.len(), source, game_id);
        rows.iter().map(deleted_from_row).collect()
    }

    async fn find_victory_point_by_source(
        &self,
        game_id: Uuid,
        source: VpSource,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id FROM victory_point_earned WHERE game_id = ? AND source = ? ORDER BY round, timestamp, id LIMIT 1",
        )
        .bind(game_id.to_string())
        .bind(source.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|r| uuid_column(r, "id")).transpose()
    }

    async fn list_victory_points(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<VictoryPointRecord>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, game_id, player_name, source, round, timestamp FROM victory_point_earned WHERE game_id = ? ORDER BY round ASC, timestamp ASC, id ASC",
        )
        .bind(game_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(victory_point_from_row).collect()
    }

    async fn find_high_council(
        &self,
        game_id: Uuid,
        player_name: &str,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let row =
            sqlx::query("SELECT id FROM high_council_acquired WHERE game_id = ? AND player_name = ?")
                .bind(game_id.to_string())
                .bind(player_name)
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(|r| uuid_column(r, "id")).transpose()
    }

    async fn insert_high_council(
        &self,
        game_id: Uuid,
        player_name: &str,
        round: Round,
    ) -> Result<HighCouncilRecord, DatabaseError> {
        let record = HighCouncilRecord {
            id: Uuid::new_v4(),
            game_id,
            player_name: player_name.to_string(),
            round,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO high_council_acquired (id, game_id, player_name, round, timestamp) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.game_id.to_string())
        .bind(&record.player_name)
        .bind(i64::from(record.round.number()))
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| acquisition_error(e, "High council", player_name))?;

        tracing::debug!("{} joined the high council in round {}", player_name, round);
        Ok(record)
    }

    async fn delete_high_council(&self, id: Uuid) -> Result<Option<DeletedRecord>, DatabaseError> {
        let row = sqlx::query("DELETE FROM high_council_acquired WHERE id = ? RETURNING id, game_id")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(deleted_from_row).transpose()
    }

    async fn list_high_councils(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<HighCouncilRecord>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, game_id, player_name, round, timestamp FROM high_council_acquired WHERE game_id = ? ORDER BY round ASC, timestamp ASC, id ASC",
        )
        .bind(game_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(high_council_from_row).collect()
    }

    async fn find_swordmaster(
        &self,
        game_id: Uuid,
        player_name: &str,
    ) -> Result<Option<Uuid>, DatabaseError> {
        let row =
            sqlx::query("SELECT id FROM swordmaster_acquired WHERE game_id = ? AND player_name = ?")
                .bind(game_id.to_string())
                .bind(player_name)
                .fetch_optional(&self.pool)
                .await?;

        row.as_ref().map(|r| uuid_column(r, "id")).transpose()
    }

    async fn insert_swordmaster(
        &self,
        game_id: Uuid,
        player_name: &str,
        round: Round,
        cost: SwordmasterCost,
    ) -> Result<SwordmasterRecord, DatabaseError> {
        let record = SwordmasterRecord {
            id: Uuid::new_v4(),
            game_id,
            player_name: player_name.to_string(),
            round,
            cost,
            timestamp: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO swordmaster_acquired (id, game_id, player_name, round, cost, timestamp) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.game_id.to_string())
        .bind(&record.player_name)
        .bind(i64::from(record.round.number()))
        .bind(i64::from(record.cost.value()))
        .bind(record.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| acquisition_error(e, "Swordmaster", player_name))?;

        tracing::debug!(
            "{} recruited the swordmaster for {} in round {}",
            player_name,
            cost,
            round
        );
        Ok(record)
    }

    async fn delete_swordmaster(&self, id: Uuid) -> Result<Option<DeletedRecord>, DatabaseError> {
        let row = sqlx::query("DELETE FROM swordmaster_acquired WHERE id = ? RETURNING id, game_id")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(deleted_from_row).transpose()
    }

    async fn list_swordmasters(
        &self,
        game_id: Uuid,
    ) -> Result<Vec<SwordmasterRecord>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, game_id, player_name, round, cost, timestamp FROM swordmaster_acquired WHERE game_id = ? ORDER BY round ASC, timestamp ASC, id ASC",
        )
        .bind(game_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(swordmaster_from_row).collect()
    }
}
