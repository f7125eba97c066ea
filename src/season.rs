use std::collections::HashMap;

use log::{debug, info};
use rand::Rng;

use crate::error::{LeagueError, Result};
use crate::fixtures::generate_fixtures;
use crate::model::{FixtureRow, Game, GameId, Prediction, Standing, Team, TeamId, TeamRef};
use crate::predictor::{self, DEFAULT_MIN_WEEK};
use crate::simulator::simulate_scores;
use crate::standings::compute_standings;
use crate::store::{GameStore, TeamStore};

/// Drives one season against a store.
///
/// Methods that write take `&mut self`, so a single `League` never races
/// itself. Separate processes sharing a database must still be serialized by
/// the caller, except for `bootstrap`, which the store makes atomic.
pub struct League<S, R> {
    store: S,
    rng: R,
    min_prediction_week: u32,
}

impl<S, R> League<S, R>
where
    S: TeamStore + GameStore,
    R: Rng,
{
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            min_prediction_week: DEFAULT_MIN_WEEK,
        }
    }

    pub fn with_min_prediction_week(mut self, min_week: u32) -> Self {
        self.min_prediction_week = min_week;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Schedule the season if nothing has been scheduled yet.
    ///
    /// Returns `true` when fixtures were created by this call.
    pub fn bootstrap(&mut self) -> Result<bool> {
        let team_ids = self.store.list_team_ids()?;
        if team_ids.len() < 2 {
            return Err(LeagueError::Domain(format!(
                "a season needs at least two teams, found {}",
                team_ids.len()
            )));
        }

        let fixtures = generate_fixtures(&team_ids);
        let created = self.store.insert_fixtures_if_empty(&fixtures)?;
        if created {
            info!(
                "scheduled {} fixtures for {} teams",
                fixtures.len(),
                team_ids.len()
            );
        } else {
            debug!("season already scheduled, bootstrap skipped");
        }
        Ok(created)
    }

    /// Simulate the earliest week that still has unplayed games.
    ///
    /// Once every game is played this returns an empty list.
    pub fn play_next_week(&mut self) -> Result<Vec<Game>> {
        let Some(week) = self.store.min_unplayed_week()? else {
            debug!("no unplayed games left");
            return Ok(Vec::new());
        };

        let strengths = self.strengths()?;
        let games = self.store.games_in_week(week)?;
        let mut played = Vec::with_capacity(games.len());
        for game in games {
            played.push(self.simulate_and_store(game, &strengths)?);
        }
        info!("played week {week} ({} games)", played.len());
        Ok(played)
    }

    /// Simulate every unplayed game in the season and return all games.
    pub fn play_all_weeks(&mut self) -> Result<Vec<Game>> {
        let strengths = self.strengths()?;
        let games = self.store.all_games()?;
        let mut out = Vec::with_capacity(games.len());
        let mut simulated = 0usize;
        for game in games {
            if game.is_played() {
                out.push(game);
                continue;
            }
            out.push(self.simulate_and_store(game, &strengths)?);
            simulated += 1;
        }
        info!("played remaining season ({simulated} games)");
        Ok(out)
    }

    /// Replace a game's scores with the given values.
    pub fn override_result(&mut self, id: GameId, home: i64, away: i64) -> Result<Game> {
        let home = validate_score("home_score", home)?;
        let away = validate_score("away_score", away)?;

        let mut game = self.store.find_by_id(id)?;
        self.store.update_scores(id, home, away)?;
        game.home_score = Some(home);
        game.away_score = Some(away);
        info!("game {id} result set to {home}-{away}");
        Ok(game)
    }

    pub fn standings(&self) -> Result<Vec<Standing>> {
        let teams = self.store.list_teams_with_games()?;
        Ok(compute_standings(&teams))
    }

    pub fn predictions(&self) -> Result<Vec<Prediction>> {
        let max_week = self.store.max_played_week()?;
        let teams = self.store.list_teams()?;
        predictor::compute_predictions(&teams, max_week, self.min_prediction_week)
    }

    /// Highest fully played week, 0 before the first result.
    pub fn current_week(&self) -> Result<u32> {
        Ok(self.store.max_played_week()?.unwrap_or(0))
    }

    pub fn fixtures(&self) -> Result<Vec<FixtureRow>> {
        let games = self.store.all_games()?;
        self.fixture_rows(&games)
    }

    /// Attach team names to games for display.
    pub fn fixture_rows(&self, games: &[Game]) -> Result<Vec<FixtureRow>> {
        let teams: HashMap<TeamId, Team> = self
            .store
            .list_teams()?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();
        let team_ref = |id: TeamId| TeamRef {
            id,
            name: teams.get(&id).map(|t| t.name.clone()).unwrap_or_default(),
        };

        Ok(games
            .iter()
            .map(|g| FixtureRow {
                id: g.id,
                week: g.week,
                home_team: team_ref(g.home_team_id),
                away_team: team_ref(g.away_team_id),
                home_score: g.home_score,
                away_score: g.away_score,
            })
            .collect())
    }

    fn strengths(&self) -> Result<HashMap<TeamId, u32>> {
        Ok(self
            .store
            .list_teams()?
            .into_iter()
            .map(|t| (t.id, t.strength))
            .collect())
    }

    fn simulate_and_store(&mut self, mut game: Game, strengths: &HashMap<TeamId, u32>) -> Result<Game> {
        let home_strength = strengths.get(&game.home_team_id).copied().unwrap_or(0);
        let away_strength = strengths.get(&game.away_team_id).copied().unwrap_or(0);
        let (home, away) = simulate_scores(&mut self.rng, home_strength, away_strength);

        self.store.update_scores(game.id, home, away)?;
        debug!(
            "week {} game {}: {} {home}-{away} {}",
            game.week, game.id, game.home_team_id, game.away_team_id
        );
        game.home_score = Some(home);
        game.away_score = Some(away);
        Ok(game)
    }
}

fn validate_score(field: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(LeagueError::Validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    u32::try_from(value)
        .map_err(|_| LeagueError::Validation(format!("{field} is out of range: {value}")))
}

/// Parse a score typed by a user. Anything but a whole number is rejected.
pub fn parse_score(field: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| LeagueError::Validation(format!("{field} must be an integer, got {raw:?}")))
}
