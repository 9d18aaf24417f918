pub mod actions;
pub mod board;
pub mod breakdown;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pages;
pub mod render;
pub mod revalidation;
pub mod session;
pub mod timer;

pub use actions::{
    add_high_council, add_swordmaster, add_victory_point, check_offered, create_game,
    edit_victory_point, ensure_offered, find_victory_point_by_source, load_game_data,
    remove_high_council, remove_swordmaster, remove_victory_point,
};
pub use board::{RoundSelector, VpGrid};
pub use breakdown::{breakdown_by_round, RoundBreakdown};
pub use catalog::search_sources;
pub use config::TrackerConfig;
pub use error::{ActionError, ConfigError, ErrorKind, Mutation};
pub use pages::GamePageCache;
pub use revalidation::{Outcome, Revalidation, PAGE_ROOT};
pub use session::TrackerSession;
pub use timer::GameTimer;
