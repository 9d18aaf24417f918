//! End-to-end tests for the tracker mutations, session and page cache
//!
//! Each test gets its own in-memory SQLite database with migrations applied.

use database::{connect, DatabaseConfig, SqliteStore, TrackerStore};
use tracker::{
    add_high_council, add_swordmaster, add_victory_point, check_offered, create_game,
    edit_victory_point, ensure_offered, find_victory_point_by_source, load_game_data,
    remove_high_council, remove_swordmaster, remove_victory_point, ErrorKind, GamePageCache,
    Mutation, Revalidation, TrackerSession,
};
use types::{GameType, PlayerNames, Round, SwordmasterCost, VpSource, GRID_SQUARES};
use uuid::Uuid;

async fn setup_store() -> SqliteStore {
    connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("Failed to connect")
}

fn abcd() -> PlayerNames {
    PlayerNames::new(["A".into(), "B".into(), "C".into(), "D".into()])
}

fn round(n: u8) -> Round {
    Round::new(n).unwrap()
}

async fn new_game(store: &SqliteStore) -> Uuid {
    create_game(store, GameType::Base, abcd())
        .await
        .expect("Failed to create game")
        .value
}

#[tokio::test]
async fn test_create_game_seeds_one_vp_per_player() {
    let store = setup_store().await;
    let outcome = create_game(&store, GameType::Base, abcd()).await.unwrap();
    assert_eq!(outcome.revalidation, Some(Revalidation::for_game(outcome.value)));

    let data = load_game_data(&store, outcome.value).await.unwrap();
    assert_eq!(data.player_names(), vec!["A", "B", "C", "D"]);
    for name in ["A", "B", "C", "D"] {
        let player = data.player(name).unwrap();
        assert_eq!(player.total, 1);
        assert_eq!(player.vps[0].source, VpSource::Misc4p);
        assert_eq!(player.vps[0].round, Round::FIRST);
        assert!(player.high_council.is_none());
        assert!(player.swordmaster.is_none());
    }
}

#[tokio::test]
async fn test_edit_keeps_identity() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    let added = add_victory_point(&store, game_id, "A", VpSource::ConflictI, round(3), true)
        .await
        .unwrap();
    let vp = added.value;
    let edited = edit_victory_point(&store, vp.id, VpSource::ConflictIi)
        .await
        .unwrap();
    assert_eq!(edited.revalidation, Some(Revalidation::for_game(game_id)));
    assert_eq!(edited.value.id, vp.id);
    assert_eq!(edited.value.round, round(3));
    assert_eq!(edited.value.timestamp, vp.timestamp);

    let data = load_game_data(&store, game_id).await.unwrap();
    let sources: Vec<_> = data.player("A").unwrap().vps.iter().map(|v| v.source).collect();
    assert_eq!(sources, vec![VpSource::Misc4p, VpSource::ConflictIi]);
}

#[tokio::test]
async fn test_refresh_can_be_suppressed() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    let outcome = add_victory_point(&store, game_id, "C", VpSource::TechFlagship, round(2), false)
        .await
        .unwrap();
    assert!(outcome.revalidation.is_none());
}

#[tokio::test]
async fn test_second_swordmaster_is_rejected() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    add_swordmaster(&store, game_id, "B", round(4), 8, true)
        .await
        .unwrap();
    let err = add_swordmaster(&store, game_id, "B", round(5), 6, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyAcquired);
    assert_eq!(err.to_string(), "Failed to add swordmaster");

    let data = load_game_data(&store, game_id).await.unwrap();
    let swordmaster = data.player("B").unwrap().swordmaster.as_ref().unwrap();
    assert_eq!(swordmaster.cost, SwordmasterCost::Eight);
    assert_eq!(swordmaster.round, round(4));

    remove_swordmaster(&store, swordmaster.id).await.unwrap();
    add_swordmaster(&store, game_id, "B", round(5), 6, true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_swordmaster_cost_touches_nothing() {
    let store = setup_store().await;
    let err = add_swordmaster(&store, Uuid::new_v4(), "B", round(1), 7, true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Swordmaster cost must be 6 or 8");
}

#[tokio::test]
async fn test_remove_unknown_vp_is_not_found() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    let err = remove_victory_point(&store, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "Failed to remove victory point");

    let err = edit_victory_point(&store, Uuid::new_v4(), VpSource::ConflictI)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let data = load_game_data(&store, game_id).await.unwrap();
    assert!(data.by_player.values().all(|p| p.total == 1));
}

#[tokio::test]
async fn test_alliance_changes_hands() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    let first = add_victory_point(&store, game_id, "A", VpSource::AllianceFremen, round(2), true)
        .await
        .unwrap()
        .value;
    assert_eq!(
        find_victory_point_by_source(&store, game_id, VpSource::AllianceFremen).await,
        Some(first.id)
    );

    let second = add_victory_point(&store, game_id, "C", VpSource::AllianceFremen, round(5), true)
        .await
        .unwrap()
        .value;

    let data = load_game_data(&store, game_id).await.unwrap();
    assert_eq!(data.player("A").unwrap().total, 1);
    assert_eq!(data.player("C").unwrap().total, 2);
    assert_eq!(
        find_victory_point_by_source(&store, game_id, VpSource::AllianceFremen).await,
        Some(second.id)
    );
}

#[tokio::test]
async fn test_alliance_add_clears_every_holder() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    add_victory_point(&store, game_id, "A", VpSource::AllianceFremen, round(2), true)
        .await
        .unwrap();
    let b = add_victory_point(&store, game_id, "B", VpSource::ConflictI, round(2), true)
        .await
        .unwrap()
        .value;
    // Editing never displaces, so the alliance now has two holders.
    edit_victory_point(&store, b.id, VpSource::AllianceFremen)
        .await
        .unwrap();

    add_victory_point(&store, game_id, "C", VpSource::AllianceFremen, round(3), true)
        .await
        .unwrap();

    let holders: Vec<String> = store
        .list_victory_points(game_id)
        .await
        .unwrap()
        .into_iter()
        .filter(|vp| vp.source == VpSource::AllianceFremen)
        .map(|vp| vp.player_name)
        .collect();
    assert_eq!(holders, vec!["C"]);
}

#[tokio::test]
async fn test_sources_outside_catalog_are_rejected() {
    let store = setup_store().await;
    let game_id = create_game(&store, GameType::Uprising, abcd())
        .await
        .unwrap()
        .value;

    let err = check_offered(GameType::Uprising, VpSource::TechFlagship).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(check_offered(GameType::Base, VpSource::TechFlagship).is_ok());

    let err = ensure_offered(&store, Mutation::AddVictoryPoint, game_id, VpSource::TechFlagship)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    ensure_offered(&store, Mutation::AddVictoryPoint, game_id, VpSource::ConflictBattleIcons)
        .await
        .unwrap();

    let mut session = TrackerSession::new(load_game_data(&store, game_id).await.unwrap());
    session.open_square(2);
    assert!(session.select_source(&store, VpSource::TechFlagship).await.is_none());
    assert!(session.selected_square().is_none());

    // Editing the seed square into a base-only source is refused too.
    session.open_square(1);
    assert!(session.select_source(&store, VpSource::IntrigueChoamShares).await.is_none());

    let data = load_game_data(&store, game_id).await.unwrap();
    let sources: Vec<_> = data.player("A").unwrap().vps.iter().map(|v| v.source).collect();
    assert_eq!(sources, vec![VpSource::Misc4p]);
}

#[tokio::test]
async fn test_non_alliance_sources_can_repeat() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    for n in 2..=3 {
        add_victory_point(&store, game_id, "D", VpSource::ConflictI, round(n), true)
            .await
            .unwrap();
    }
    add_victory_point(&store, game_id, "A", VpSource::ConflictI, round(3), true)
        .await
        .unwrap();

    let data = load_game_data(&store, game_id).await.unwrap();
    assert_eq!(data.player("D").unwrap().total, 3);
    assert_eq!(data.player("A").unwrap().total, 2);
}

#[tokio::test]
async fn test_high_council_remove_then_readd() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;

    let seat = add_high_council(&store, game_id, "A", round(3), true)
        .await
        .unwrap()
        .value;
    let err = add_high_council(&store, game_id, "A", round(4), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyAcquired);

    let removed = remove_high_council(&store, seat.id).await.unwrap();
    assert_eq!(removed.value.game_id, game_id);
    let err = remove_high_council(&store, seat.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    add_high_council(&store, game_id, "A", round(6), true)
        .await
        .unwrap();
    let data = load_game_data(&store, game_id).await.unwrap();
    assert_eq!(data.player("A").unwrap().high_council.as_ref().unwrap().round, round(6));
}

#[tokio::test]
async fn test_add_to_missing_game_is_storage_failure() {
    let store = setup_store().await;
    let err = add_victory_point(&store, Uuid::new_v4(), "A", VpSource::ConflictI, round(1), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(load_game_data(&store, Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn test_session_adds_edits_and_deletes_squares() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    let mut session = TrackerSession::new(load_game_data(&store, game_id).await.unwrap());
    assert_eq!(session.selected_player(), "A");
    session.rounds_mut().set(round(2));

    // Square 1 holds the seed; square 2 is empty.
    session.open_square(2);
    let signal = session
        .select_source(&store, VpSource::ConflictIi)
        .await
        .expect("add should revalidate");
    assert!(session.selected_square().is_none());
    assert!(session.refresh(&store, &signal).await);
    assert_eq!(session.grid().filled(), 2);
    assert_eq!(session.grid().square(2).unwrap().round, round(2));

    session.open_square(2);
    assert!(session.select_source(&store, VpSource::ConflictIi).await.is_none());

    session.open_square(2);
    let signal = session
        .select_source(&store, VpSource::ConflictIii)
        .await
        .unwrap();
    session.refresh(&store, &signal).await;
    assert_eq!(session.grid().square(2).unwrap().source, VpSource::ConflictIii);

    session.open_square(1);
    let signal = session.delete_selected(&store).await.unwrap();
    session.refresh(&store, &signal).await;
    assert_eq!(session.grid().filled(), 1);
    assert_eq!(session.grid().square(1).unwrap().source, VpSource::ConflictIii);

    // Earlier rounds hide later VPs.
    session.rounds_mut().previous();
    assert_eq!(session.grid().filled(), 0);
}

#[tokio::test]
async fn test_session_toggles_landsraad() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    let mut session = TrackerSession::new(load_game_data(&store, game_id).await.unwrap());
    session.select_player("B");
    session.rounds_mut().set(round(4));

    let signal = session.toggle_high_council(&store).await.unwrap();
    session.refresh(&store, &signal).await;
    let player = session.data().player("B").unwrap();
    assert_eq!(player.high_council.as_ref().unwrap().round, round(4));

    let signal = session.toggle_high_council(&store).await.unwrap();
    session.refresh(&store, &signal).await;
    assert!(session.data().player("B").unwrap().high_council.is_none());

    let signal = session
        .toggle_swordmaster(&store, SwordmasterCost::Six)
        .await
        .unwrap();
    session.refresh(&store, &signal).await;
    let signal = session
        .toggle_swordmaster(&store, SwordmasterCost::Eight)
        .await
        .unwrap();
    session.refresh(&store, &signal).await;
    let swordmaster = session.data().player("B").unwrap().swordmaster.clone().unwrap();
    assert_eq!(swordmaster.cost, SwordmasterCost::Eight);

    let signal = session
        .toggle_swordmaster(&store, SwordmasterCost::Eight)
        .await
        .unwrap();
    session.refresh(&store, &signal).await;
    assert!(session.data().player("B").unwrap().swordmaster.is_none());
}

#[tokio::test]
async fn test_session_ignores_other_games() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    let mut session = TrackerSession::new(load_game_data(&store, game_id).await.unwrap());
    let other = Revalidation::for_game(Uuid::new_v4());
    assert!(!session.refresh(&store, &other).await);

    // Nothing selected means nothing to do.
    assert!(session.select_source(&store, VpSource::ConflictI).await.is_none());
    assert!(session.delete_selected(&store).await.is_none());

    // An unseated name is selectable but has nothing on the track.
    session.select_player("Stray");
    assert_eq!(session.selected_player(), "Stray");
    assert_eq!(session.grid().filled(), 0);
    assert_eq!(session.breakdown().len(), 1);
}

#[tokio::test]
async fn test_full_grid_caps_display() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    for _ in 0..GRID_SQUARES + 2 {
        add_victory_point(&store, game_id, "A", VpSource::ConflictI, round(1), false)
            .await
            .unwrap();
    }
    let mut session = TrackerSession::new(load_game_data(&store, game_id).await.unwrap());
    session.rounds_mut().set(Round::LAST);
    assert_eq!(session.data().player("A").unwrap().total, GRID_SQUARES + 3);
    assert_eq!(session.grid().filled(), GRID_SQUARES);
    assert!(!session.grid().can_add());
}

#[tokio::test]
async fn test_page_cache_drops_invalidated_pages() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    let mut cache = GamePageCache::new();

    let total = cache.get_or_load(&store, game_id).await.unwrap().player("A").unwrap().total;
    assert_eq!(total, 1);
    assert!(cache.contains(game_id));

    let outcome = add_victory_point(&store, game_id, "A", VpSource::ConflictI, round(1), true)
        .await
        .unwrap();
    let stale = cache.get_or_load(&store, game_id).await.unwrap().player("A").unwrap().total;
    assert_eq!(stale, 1);

    assert!(cache.invalidate(&outcome.revalidation.unwrap()));
    assert!(!cache.contains(game_id));
    let fresh = cache.get_or_load(&store, game_id).await.unwrap().player("A").unwrap().total;
    assert_eq!(fresh, 2);

    assert!(cache.get_or_load(&store, Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn test_deleting_game_cascades() {
    let store = setup_store().await;
    let game_id = new_game(&store).await;
    add_swordmaster(&store, game_id, "A", round(2), 6, true)
        .await
        .unwrap();
    assert_eq!(store.delete_game(game_id).await.unwrap(), Some(game_id));
    assert!(load_game_data(&store, game_id).await.is_none());
    assert!(store.list_victory_points(game_id).await.unwrap().is_empty());
    assert!(store.list_swordmasters(game_id).await.unwrap().is_empty());
}
