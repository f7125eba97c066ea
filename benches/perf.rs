use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use league_sim::League;
use league_sim::fixtures::generate_fixtures;
use league_sim::model::{TeamId, TeamWithGames};
use league_sim::simulator::simulate_scores;
use league_sim::standings::compute_standings;
use league_sim::store::{MemoryStore, TeamStore};

fn twenty_team_league() -> MemoryStore {
    let names: Vec<String> = (1..=20).map(|idx| format!("Club {idx}")).collect();
    let teams: Vec<(&str, u32)> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), 60 + (idx as u32 * 7) % 40))
        .collect();
    MemoryStore::with_teams(&teams)
}

fn played_season() -> Vec<TeamWithGames> {
    let mut league = League::new(twenty_team_league(), StdRng::seed_from_u64(1));
    league.bootstrap().expect("bootstrap");
    league.play_all_weeks().expect("play all");
    league
        .store()
        .list_teams_with_games()
        .expect("teams with games")
}

fn bench_fixture_generation(c: &mut Criterion) {
    let ids: Vec<TeamId> = (1..=20).map(TeamId).collect();
    c.bench_function("fixtures_20_teams", |b| {
        b.iter(|| {
            let fixtures = generate_fixtures(black_box(&ids));
            black_box(fixtures.len());
        })
    });
}

fn bench_simulation(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("simulate_scores", |b| {
        b.iter(|| black_box(simulate_scores(&mut rng, black_box(88), black_box(85))))
    });
}

fn bench_standings(c: &mut Criterion) {
    let teams = played_season();
    c.bench_function("standings_20_teams", |b| {
        b.iter(|| {
            let table = compute_standings(black_box(&teams));
            black_box(table.len());
        })
    });
}

criterion_group!(
    benches,
    bench_fixture_generation,
    bench_simulation,
    bench_standings
);
criterion_main!(benches);
