use std::fmt::Display;

use uuid::Uuid;

pub const PAGE_ROOT: &str = "/dune-tracker";

/// Tells the caller that a game's page is stale and must be re-read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Revalidation {
    pub game_id: Uuid,
}

impl Revalidation {
    pub fn for_game(game_id: Uuid) -> Self {
        Self { game_id }
    }

    pub fn page_path(&self) -> String {
        format!("{PAGE_ROOT}/{}", self.game_id)
    }
}

impl Display for Revalidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "revalidate {}", self.page_path())
    }
}

/// A mutation's result plus the page it invalidated, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub revalidation: Option<Revalidation>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, game_id: Uuid, refresh: bool) -> Self {
        Self {
            value,
            revalidation: refresh.then(|| Revalidation::for_game(game_id)),
        }
    }
}
