//! Client-side state for one open game page.
//!
//! The session owns the loaded [`GameData`] plus what the user is pointing at:
//! the selected player, the round on display and the square whose source
//! picker is open. Its handlers translate clicks into mutations and pass the
//! resulting [`Revalidation`] back so the caller can reload.

use database::{GameData, PlayerVpData, TrackerStore};
use types::{Round, SwordmasterCost, VpSource};
use uuid::Uuid;

use crate::actions;
use crate::board::{RoundSelector, VpGrid};
use crate::breakdown::{breakdown_by_round, RoundBreakdown};
use crate::error::ActionError;
use crate::revalidation::{Outcome, Revalidation};

#[derive(Debug, Clone)]
pub struct TrackerSession {
    data: GameData,
    selected_player: String,
    rounds: RoundSelector,
    selected_square: Option<usize>,
}

impl TrackerSession {
    pub fn new(data: GameData) -> Self {
        let selected_player = data.players().first().to_string();
        Self {
            data,
            selected_player,
            rounds: RoundSelector::default(),
            selected_square: None,
        }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn game_id(&self) -> Uuid {
        self.data.game.id
    }

    pub fn selected_player(&self) -> &str {
        &self.selected_player
    }

    /// Names without a seat are still selectable; events may carry them.
    pub fn select_player(&mut self, name: &str) {
        if !self.data.players().contains(name) {
            log::warn!("{name} has no seat in game {}", self.game_id());
        }
        self.selected_player = name.to_string();
        self.selected_square = None;
    }

    pub fn rounds(&self) -> &RoundSelector {
        &self.rounds
    }

    pub fn rounds_mut(&mut self) -> &mut RoundSelector {
        &mut self.rounds
    }

    pub fn round(&self) -> Round {
        self.rounds.current()
    }

    fn player_data(&self) -> Option<&PlayerVpData> {
        self.data.player(&self.selected_player)
    }

    pub fn grid(&self) -> VpGrid {
        match self.player_data() {
            Some(player) => VpGrid::layout(&player.vps, self.round()),
            None => VpGrid::default(),
        }
    }

    pub fn breakdown(&self) -> Vec<RoundBreakdown<'_>> {
        match self.player_data() {
            Some(player) => breakdown_by_round(player),
            None => breakdown_by_round(&EMPTY_PLAYER),
        }
    }

    pub fn selected_square(&self) -> Option<usize> {
        self.selected_square
    }

    /// Opens the source picker on a square.
    pub fn open_square(&mut self, square: usize) {
        self.selected_square = Some(square);
    }

    pub fn close_selector(&mut self) {
        self.selected_square = None;
    }

    /// Applies a source picked for the open square.
    ///
    /// A filled square is edited when the source differs and left alone when
    /// it is the same. An empty square gets a new VP at the displayed round.
    /// Sources outside the game's catalog are refused.
    pub async fn select_source<S>(&mut self, store: &S, source: VpSource) -> Option<Revalidation>
    where
        S: TrackerStore + ?Sized,
    {
        let square = self.selected_square.take()?;
        if let Err(err) = actions::check_offered(self.data.game.game_type, source) {
            log::warn!("Tracker action failed: {err}");
            return None;
        }
        let existing = self.grid().square(square).map(|vp| (vp.id, vp.source));

        match existing {
            Some((_, current)) if current == source => None,
            Some((vp_id, _)) => settle(actions::edit_victory_point(store, vp_id, source).await),
            None => settle(
                actions::add_victory_point(
                    store,
                    self.game_id(),
                    &self.selected_player,
                    source,
                    self.round(),
                    true,
                )
                .await,
            ),
        }
    }

    /// Removes the VP on the open square, if there is one.
    pub async fn delete_selected<S>(&mut self, store: &S) -> Option<Revalidation>
    where
        S: TrackerStore + ?Sized,
    {
        let square = self.selected_square.take()?;
        let vp_id = self.grid().square(square)?.id;
        settle(actions::remove_victory_point(store, vp_id).await)
    }

    pub async fn toggle_high_council<S>(&mut self, store: &S) -> Option<Revalidation>
    where
        S: TrackerStore + ?Sized,
    {
        self.selected_square = None;
        let existing = self.player_data().and_then(|p| p.high_council.as_ref());
        match existing.map(|record| record.id) {
            Some(id) => settle(actions::remove_high_council(store, id).await),
            None => settle(
                actions::add_high_council(
                    store,
                    self.game_id(),
                    &self.selected_player,
                    self.round(),
                    true,
                )
                .await,
            ),
        }
    }

    /// Clicking the held cost clears it. Clicking the other cost swaps it.
    pub async fn toggle_swordmaster<S>(
        &mut self,
        store: &S,
        cost: SwordmasterCost,
    ) -> Option<Revalidation>
    where
        S: TrackerStore + ?Sized,
    {
        self.selected_square = None;
        let existing = self
            .player_data()
            .and_then(|p| p.swordmaster.as_ref())
            .map(|record| (record.id, record.cost));

        let mut removed = None;
        if let Some((id, held)) = existing {
            removed = settle(actions::remove_swordmaster(store, id).await);
            if held == cost || removed.is_none() {
                return removed;
            }
        }

        let added = settle(
            actions::add_swordmaster(
                store,
                self.game_id(),
                &self.selected_player,
                self.round(),
                cost.value(),
                true,
            )
            .await,
        );
        added.or(removed)
    }

    /// Reloads the page if the signal is for this game. Returns whether data changed.
    pub async fn refresh<S>(&mut self, store: &S, revalidation: &Revalidation) -> bool
    where
        S: TrackerStore + ?Sized,
    {
        if revalidation.game_id != self.game_id() {
            return false;
        }
        match actions::load_game_data(store, self.game_id()).await {
            Some(data) => {
                self.replace_data(data);
                true
            }
            None => false,
        }
    }

    pub fn replace_data(&mut self, data: GameData) {
        self.data = data;
    }
}

static EMPTY_PLAYER: PlayerVpData = PlayerVpData {
    vps: Vec::new(),
    high_council: None,
    swordmaster: None,
    total: 0,
};

fn settle<T>(result: Result<Outcome<T>, ActionError>) -> Option<Revalidation> {
    match result {
        Ok(outcome) => outcome.revalidation,
        Err(err) => {
            log::warn!("Tracker action failed: {err}");
            None
        }
    }
}
