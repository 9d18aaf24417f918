//! Mutation handlers for the tracker.
//!
//! Each handler validates what it can, performs its writes, and hands back an
//! [`Outcome`] carrying the page it made stale. Failures are logged here with
//! the operation name and identifiers, then surfaced as a short [`ActionError`].

use database::{
    fetch_game_data, DatabaseError, DeletedRecord, GameData, HighCouncilRecord, SwordmasterRecord,
    TrackerStore, VictoryPointRecord,
};
use types::{GameType, PlayerNames, Round, SwordmasterCost, VpSource, SEED_SOURCE};
use uuid::Uuid;

use crate::error::{ActionError, Mutation};
use crate::revalidation::Outcome;

fn failed(mutation: Mutation, context: String, source: DatabaseError) -> ActionError {
    log::error!("[{}] Failed {{ {context} }}: {source}", mutation.operation());
    ActionError::Failed { mutation, source }
}

fn not_found(entity: &'static str, id: Uuid) -> DatabaseError {
    DatabaseError::NotFound { entity, id }
}

/// Reads a game page. Read failures are logged and reported as a missing game.
pub async fn load_game_data<S>(store: &S, game_id: Uuid) -> Option<GameData>
where
    S: TrackerStore + ?Sized,
{
    match fetch_game_data(store, game_id).await {
        Ok(data) => data,
        Err(err) => {
            log::error!("[getGameDataById] Failed to fetch game {{ id: {game_id} }}: {err}");
            None
        }
    }
}

/// Rejects a source that the game's variant does not offer.
pub fn check_offered(game_type: GameType, source: VpSource) -> Result<(), ActionError> {
    if game_type.offers(source) {
        return Ok(());
    }
    log::warn!("Rejected {source}: not offered in {game_type} games");
    Err(ActionError::SourceNotOffered {
        vp_source: source,
        game_type,
    })
}

/// Looks up the game's variant and checks `source` against it.
///
/// A missing game passes here and fails on the write that follows.
pub async fn ensure_offered<S>(
    store: &S,
    mutation: Mutation,
    game_id: Uuid,
    source: VpSource,
) -> Result<(), ActionError>
where
    S: TrackerStore + ?Sized,
{
    match store.find_game(game_id).await {
        Ok(Some(game)) => check_offered(game.game_type, source),
        Ok(None) => Ok(()),
        Err(err) => Err(failed(
            mutation,
            format!("game_id: {game_id}, source: {source}"),
            err,
        )),
    }
}

/// Creates a game and seeds one VP per seat.
///
/// The seed inserts run concurrently and are not rolled back if one of them
/// fails after the game row is written.
pub async fn create_game<S>(
    store: &S,
    game_type: GameType,
    players: PlayerNames,
) -> Result<Outcome<Uuid>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = async {
        let game = store.insert_game(game_type, &players).await?;
        let [p1, p2, p3, p4] = game.players.as_array();
        tokio::try_join!(
            insert_victory_point(store, game.id, p1, SEED_SOURCE, Round::FIRST),
            insert_victory_point(store, game.id, p2, SEED_SOURCE, Round::FIRST),
            insert_victory_point(store, game.id, p3, SEED_SOURCE, Round::FIRST),
            insert_victory_point(store, game.id, p4, SEED_SOURCE, Round::FIRST),
        )?;
        Ok::<_, DatabaseError>(game.id)
    }
    .await;

    match result {
        Ok(game_id) => {
            log::info!("Created {game_type} game {game_id} for {players}");
            Ok(Outcome::new(game_id, game_id, true))
        }
        Err(err) => Err(failed(
            Mutation::CreateGame,
            format!("game_type: {game_type}, players: [{players}]"),
            err,
        )),
    }
}

async fn insert_victory_point<S>(
    store: &S,
    game_id: Uuid,
    player_name: &str,
    source: VpSource,
    round: Round,
) -> Result<VictoryPointRecord, DatabaseError>
where
    S: TrackerStore + ?Sized,
{
    if source.is_alliance() {
        for holder in store.delete_victory_points_by_source(game_id, source).await? {
            log::info!("{source} changes hands in game {game_id}, dropped VP {}", holder.id);
        }
    }
    store
        .insert_victory_point(game_id, player_name, source, round)
        .await
}

/// Records a VP. An alliance VP first evicts whoever held that alliance.
///
/// Pass `refresh = false` to suppress the revalidation signal.
pub async fn add_victory_point<S>(
    store: &S,
    game_id: Uuid,
    player_name: &str,
    source: VpSource,
    round: Round,
    refresh: bool,
) -> Result<Outcome<VictoryPointRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    insert_victory_point(store, game_id, player_name, source, round)
        .await
        .map(|vp| Outcome::new(vp, game_id, refresh))
        .map_err(|err| {
            failed(
                Mutation::AddVictoryPoint,
                format!(
                    "game_id: {game_id}, player_name: {player_name}, source: {source}, round: {round}"
                ),
                err,
            )
        })
}

/// Changes the source of an existing VP, keeping its id, round and timestamp.
pub async fn edit_victory_point<S>(
    store: &S,
    vp_id: Uuid,
    new_source: VpSource,
) -> Result<Outcome<VictoryPointRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = match store.update_victory_point_source(vp_id, new_source).await {
        Ok(Some(vp)) => Ok(vp),
        Ok(None) => Err(not_found("Victory point", vp_id)),
        Err(err) => Err(err),
    };
    result
        .map(|vp| {
            let game_id = vp.game_id;
            Outcome::new(vp, game_id, true)
        })
        .map_err(|err| {
            failed(
                Mutation::EditVictoryPoint,
                format!("id: {vp_id}, new_source: {new_source}"),
                err,
            )
        })
}

pub async fn remove_victory_point<S>(
    store: &S,
    vp_id: Uuid,
) -> Result<Outcome<DeletedRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = store.delete_victory_point(vp_id).await;
    deleted(result, Mutation::RemoveVictoryPoint, "Victory point", vp_id)
}

fn deleted(
    result: Result<Option<DeletedRecord>, DatabaseError>,
    mutation: Mutation,
    entity: &'static str,
    id: Uuid,
) -> Result<Outcome<DeletedRecord>, ActionError> {
    match result {
        Ok(Some(record)) => Ok(Outcome::new(record, record.game_id, true)),
        Ok(None) => Err(failed(mutation, format!("id: {id}"), not_found(entity, id))),
        Err(err) => Err(failed(mutation, format!("id: {id}"), err)),
    }
}

/// Seats a player on the high council. Fails if they already sit there.
pub async fn add_high_council<S>(
    store: &S,
    game_id: Uuid,
    player_name: &str,
    round: Round,
    refresh: bool,
) -> Result<Outcome<HighCouncilRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = async {
        if store.find_high_council(game_id, player_name).await?.is_some() {
            return Err(DatabaseError::AlreadyAcquired {
                kind: "High council",
                player: player_name.to_string(),
            });
        }
        store.insert_high_council(game_id, player_name, round).await
    }
    .await;

    result
        .map(|record| Outcome::new(record, game_id, refresh))
        .map_err(|err| {
            failed(
                Mutation::AddHighCouncil,
                format!("game_id: {game_id}, player_name: {player_name}, round: {round}"),
                err,
            )
        })
}

pub async fn remove_high_council<S>(
    store: &S,
    id: Uuid,
) -> Result<Outcome<DeletedRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = store.delete_high_council(id).await;
    deleted(result, Mutation::RemoveHighCouncil, "High council", id)
}

/// Records the swordmaster for a player.
///
/// `cost` is checked before anything is read or written.
pub async fn add_swordmaster<S>(
    store: &S,
    game_id: Uuid,
    player_name: &str,
    round: Round,
    cost: u8,
    refresh: bool,
) -> Result<Outcome<SwordmasterRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let Ok(cost) = SwordmasterCost::try_from(cost) else {
        log::error!(
            "[{}] Rejected {{ game_id: {game_id}, player_name: {player_name}, cost: {cost} }}",
            Mutation::AddSwordmaster.operation()
        );
        return Err(ActionError::InvalidSwordmasterCost(cost));
    };

    let result = async {
        if store.find_swordmaster(game_id, player_name).await?.is_some() {
            return Err(DatabaseError::AlreadyAcquired {
                kind: "Swordmaster",
                player: player_name.to_string(),
            });
        }
        store
            .insert_swordmaster(game_id, player_name, round, cost)
            .await
    }
    .await;

    result
        .map(|record| Outcome::new(record, game_id, refresh))
        .map_err(|err| {
            failed(
                Mutation::AddSwordmaster,
                format!(
                    "game_id: {game_id}, player_name: {player_name}, round: {round}, cost: {cost}"
                ),
                err,
            )
        })
}

pub async fn remove_swordmaster<S>(
    store: &S,
    id: Uuid,
) -> Result<Outcome<DeletedRecord>, ActionError>
where
    S: TrackerStore + ?Sized,
{
    let result = store.delete_swordmaster(id).await;
    deleted(result, Mutation::RemoveSwordmaster, "Swordmaster", id)
}

/// Looks up who currently holds a source in a game, e.g. an alliance.
pub async fn find_victory_point_by_source<S>(
    store: &S,
    game_id: Uuid,
    source: VpSource,
) -> Option<Uuid>
where
    S: TrackerStore + ?Sized,
{
    match store.find_victory_point_by_source(game_id, source).await {
        Ok(id) => id,
        Err(err) => {
            log::error!(
                "[getVpIdFromSource] Failed {{ game_id: {game_id}, source: {source} }}: {err}"
            );
            None
        }
    }
}

