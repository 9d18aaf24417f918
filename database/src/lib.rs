pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod store;


pub use collectors::{fetch_game_data, GameData, GameDataCollector, PlayerVpData};
pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use models::{
    sort_chronologically, Chronological, DeletedRecord, GameRecord, HighCouncilRecord,
    SwordmasterRecord, VictoryPointRecord,
};
pub use store::{SqliteStore, TrackerStore};

/// Opens the configured database and brings its schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<SqliteStore, DatabaseError> {
    let store = SqliteStore::new(config.create_pool().await?);
    store.run_migrations().await?;
    Ok(store)
}
