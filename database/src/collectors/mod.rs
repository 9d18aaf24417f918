pub mod game_collector;
pub mod game_data;

pub use game_collector::{fetch_game_data, GameDataCollector};
pub use game_data::{GameData, PlayerVpData};
