use rand::SeedableRng;
use rand::rngs::StdRng;

use league_sim::League;
use league_sim::LeagueError;
use league_sim::fixtures::generate_fixtures;
use league_sim::model::{GameId, NewFixture, TeamId};
use league_sim::seed::{default_roster, seed_teams};
use league_sim::store::{GameStore, SqliteStore, TeamStore};

fn seeded_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("in-memory sqlite");
    seed_teams(&mut store, &default_roster()).expect("seed teams");
    store
}

#[test]
fn teams_round_trip() {
    let store = seeded_store();
    let teams = store.list_teams().unwrap();
    assert_eq!(teams.len(), 4);
    assert_eq!(teams[0].name, "Chelsea");
    assert_eq!(teams[0].strength, 90);
    assert_eq!(
        store.list_team_ids().unwrap(),
        teams.iter().map(|t| t.id).collect::<Vec<_>>()
    );
}

#[test]
fn fixtures_insert_once_and_reject_duplicates() {
    let mut store = seeded_store();
    let fixtures = generate_fixtures(&store.list_team_ids().unwrap());
    assert!(store.insert_fixtures_if_empty(&fixtures).unwrap());
    assert!(!store.insert_fixtures_if_empty(&fixtures).unwrap());
    assert_eq!(store.count().unwrap(), 12);

    let dup = NewFixture {
        week: fixtures[0].week,
        home_team_id: fixtures[0].home_team_id,
        away_team_id: fixtures[0].away_team_id,
    };
    let err = store.insert_many(&[dup]).unwrap_err();
    assert!(matches!(err, LeagueError::Storage(_)));
    assert_eq!(store.count().unwrap(), 12);
}

#[test]
fn week_queries_follow_scores() {
    let mut store = seeded_store();
    let fixtures = generate_fixtures(&store.list_team_ids().unwrap());
    store.insert_many(&fixtures).unwrap();

    assert_eq!(store.min_unplayed_week().unwrap(), Some(1));
    assert_eq!(store.max_played_week().unwrap(), None);

    let week1 = store.games_in_week(1).unwrap();
    assert_eq!(week1.len(), 2);
    for g in &week1 {
        store.update_scores(g.id, 2, 1).unwrap();
    }
    assert_eq!(store.min_unplayed_week().unwrap(), Some(2));
    assert_eq!(store.max_played_week().unwrap(), Some(1));

    let game = store.find_by_id(week1[0].id).unwrap();
    assert_eq!((game.home_score, game.away_score), (Some(2), Some(1)));
    assert!(game.is_played());

    let all = store.all_games().unwrap();
    assert_eq!(all.len(), 12);
    assert!(all.windows(2).all(|w| (w[0].week, w[0].id) < (w[1].week, w[1].id)));
}

#[test]
fn missing_games_are_not_found() {
    let mut store = seeded_store();
    assert!(store.find_by_id(GameId(77)).unwrap_err().is_not_found());
    assert!(store.update_scores(GameId(77), 1, 0).unwrap_err().is_not_found());
}

#[test]
fn teams_with_games_groups_both_sides() {
    let mut store = seeded_store();
    let fixtures = generate_fixtures(&store.list_team_ids().unwrap());
    store.insert_many(&fixtures).unwrap();

    let grouped = store.list_teams_with_games().unwrap();
    assert_eq!(grouped.len(), 4);
    for entry in &grouped {
        assert_eq!(entry.games.len(), 6);
        assert!(entry.games.iter().all(|g| g.involves(entry.team.id)));
        let home = entry
            .games
            .iter()
            .filter(|g| g.home_team_id == entry.team.id)
            .count();
        assert_eq!(home, 3);
    }
}

#[test]
fn full_season_against_sqlite() {
    let store = seeded_store();
    let mut league = League::new(store, StdRng::seed_from_u64(2024));
    assert!(league.bootstrap().unwrap());

    for _ in 0..4 {
        league.play_next_week().unwrap();
    }
    assert_eq!(league.current_week().unwrap(), 4);
    assert_eq!(league.predictions().unwrap().len(), 4);

    let rest = league.play_all_weeks().unwrap();
    assert_eq!(rest.len(), 12);
    assert!(league.play_next_week().unwrap().is_empty());

    let table = league.standings().unwrap();
    assert!(table.iter().all(|r| r.played == 6));

    let edited = league.override_result(GameId(3), 0, 0).unwrap();
    assert_eq!(edited.home_score, Some(0));
    let stored = league.store().find_by_id(GameId(3)).unwrap();
    assert_eq!((stored.home_score, stored.away_score), (Some(0), Some(0)));
}

#[test]
fn clear_wipes_the_season() {
    let mut store = seeded_store();
    let fixtures = generate_fixtures(&[TeamId(1), TeamId(2)]);
    store.insert_many(&fixtures).unwrap();
    assert_eq!(store.count().unwrap(), 2);

    store.clear().unwrap();
    assert_eq!(store.count().unwrap(), 0);
    assert!(store.list_teams().unwrap().is_empty());

    seed_teams(&mut store, &default_roster()).expect("reseed teams");
    assert_eq!(store.list_team_ids().unwrap()[0], TeamId(1));
    store.insert_many(&fixtures).unwrap();
    assert_eq!(store.all_games().unwrap()[0].id, GameId(1));
}

#[test]
fn open_creates_missing_parent_dirs() {
    let root = std::env::temp_dir().join(format!("league_sim_open_{}", std::process::id()));
    let path = root.join("nested").join("league.sqlite");
    let _ = std::fs::remove_dir_all(&root);

    let mut store = SqliteStore::open(&path).expect("open under missing dirs");
    seed_teams(&mut store, &default_roster()).expect("seed teams");
    assert_eq!(store.list_teams().unwrap().len(), 4);
    drop(store);
    assert!(path.exists());

    std::fs::remove_dir_all(&root).expect("clean up temp dir");
}

#[test]
fn open_reports_unusable_parent_dir() {
    let root = std::env::temp_dir().join(format!("league_sim_blocked_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::write(&root, b"not a directory").expect("write blocker file");

    let err = SqliteStore::open(&root.join("league.sqlite")).err().expect("open should fail");
    assert!(format!("{err:#}").contains("create db dir"));

    std::fs::remove_file(&root).expect("clean up blocker file");
}
