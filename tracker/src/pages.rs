use std::collections::HashMap;

use database::{GameData, TrackerStore};
use uuid::Uuid;

use crate::actions::load_game_data;
use crate::revalidation::Revalidation;

/// Loaded game pages, kept until a mutation marks them stale.
#[derive(Debug, Default)]
pub struct GamePageCache {
    pages: HashMap<Uuid, GameData>,
}

impl GamePageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves the cached page or reads it from the store.
    pub async fn get_or_load<S>(&mut self, store: &S, game_id: Uuid) -> Option<&GameData>
    where
        S: TrackerStore + ?Sized,
    {
        if !self.pages.contains_key(&game_id) {
            let data = load_game_data(store, game_id).await?;
            self.pages.insert(game_id, data);
        }
        self.pages.get(&game_id)
    }

    /// Drops the page named by the signal. Returns whether one was cached.
    pub fn invalidate(&mut self, revalidation: &Revalidation) -> bool {
        let dropped = self.pages.remove(&revalidation.game_id).is_some();
        if dropped {
            log::debug!("Dropped cached page {}", revalidation.page_path());
        }
        dropped
    }

    pub fn contains(&self, game_id: Uuid) -> bool {
        self.pages.contains_key(&game_id)
    }
}
