use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const PLAYER_COUNT: usize = 4;

/// Placeholder names offered when a seat is left blank.
pub const DEFAULT_PLAYER_NAMES: [&str; PLAYER_COUNT] = ["Ben", "Calvin", "Ethan", "Kebin"];

/// The four seats of a game, in seat order.
///
/// Players are identified by name everywhere downstream, so two seats with the
/// same name share one set of VPs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerNames([String; PLAYER_COUNT]);

impl PlayerNames {
    pub fn new(names: [String; PLAYER_COUNT]) -> Self {
        let duplicates: Vec<_> = names.iter().duplicates().collect();
        if !duplicates.is_empty() {
            log::warn!("Seats share a name and will share VPs: {duplicates:?}");
        }
        Self(names)
    }

    /// Trims each input and falls back to the matching default when blank.
    pub fn with_defaults<S: AsRef<str>>(inputs: &[S], defaults: &[String]) -> Self {
        let names = std::array::from_fn(|seat| {
            let input = inputs.get(seat).map(|s| s.as_ref().trim()).unwrap_or("");
            if !input.is_empty() {
                return input.to_string();
            }
            defaults
                .get(seat)
                .cloned()
                .unwrap_or_else(|| DEFAULT_PLAYER_NAMES[seat].to_string())
        });
        Self::new(names)
    }

    pub fn as_array(&self) -> &[String; PLAYER_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|seat| seat == name)
    }
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self(DEFAULT_PLAYER_NAMES.map(String::from))
    }
}

impl Display for PlayerNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().join(", "))
    }
}
