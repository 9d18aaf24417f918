pub mod game_type;
pub mod player;
pub mod round;
pub mod swordmaster;
pub mod vp_source;

pub use game_type::GameType;
pub use player::{PlayerNames, DEFAULT_PLAYER_NAMES, PLAYER_COUNT};
pub use round::Round;
pub use swordmaster::SwordmasterCost;
pub use vp_source::{pretty_label, UnknownVpSource, VpSource};

/// Number of squares on a player's VP grid.
pub const GRID_SQUARES: usize = 15;

/// Every player starts a four-player game with one VP from this source.
pub const SEED_SOURCE: VpSource = VpSource::Misc4p;
