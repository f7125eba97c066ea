use std::collections::HashSet;

use crate::error::{LeagueError, Result};
use crate::model::{Game, GameId, NewFixture, Team, TeamId, TeamWithGames};
use crate::store::{GameStore, TeamStore};

/// Vector-backed store for tests and throwaway seasons.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    teams: Vec<Team>,
    games: Vec<Game>,
    next_team_id: i64,
    next_game_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teams(teams: &[(&str, u32)]) -> Self {
        let mut store = Self::new();
        for (name, strength) in teams {
            store.push_team(name, *strength);
        }
        store
    }

    fn push_team(&mut self, name: &str, strength: u32) -> Team {
        self.next_team_id += 1;
        let team = Team {
            id: TeamId(self.next_team_id),
            name: name.to_string(),
            strength,
        };
        self.teams.push(team.clone());
        team
    }

    fn game_mut(&mut self, id: GameId) -> Result<&mut Game> {
        self.games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(LeagueError::NotFound { game_id: id })
    }
}

impl TeamStore for MemoryStore {
    fn list_team_ids(&self) -> Result<Vec<TeamId>> {
        Ok(self.teams.iter().map(|t| t.id).collect())
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    fn list_teams_with_games(&self) -> Result<Vec<TeamWithGames>> {
        Ok(self
            .teams
            .iter()
            .map(|team| TeamWithGames {
                team: team.clone(),
                games: self
                    .games
                    .iter()
                    .filter(|g| g.involves(team.id))
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    fn insert_team(&mut self, name: &str, strength: u32) -> Result<Team> {
        Ok(self.push_team(name, strength))
    }
}

impl GameStore for MemoryStore {
    fn count(&self) -> Result<usize> {
        Ok(self.games.len())
    }

    fn insert_many(&mut self, fixtures: &[NewFixture]) -> Result<()> {
        let mut scheduled: HashSet<(TeamId, TeamId, u32)> = self
            .games
            .iter()
            .map(|g| (g.home_team_id, g.away_team_id, g.week))
            .collect();
        for f in fixtures {
            if !scheduled.insert((f.home_team_id, f.away_team_id, f.week)) {
                return Err(LeagueError::Validation(format!(
                    "fixture {} v {} already scheduled in week {}",
                    f.home_team_id, f.away_team_id, f.week
                )));
            }
        }
        for f in fixtures {
            self.next_game_id += 1;
            self.games.push(Game {
                id: GameId(self.next_game_id),
                week: f.week,
                home_team_id: f.home_team_id,
                away_team_id: f.away_team_id,
                home_score: None,
                away_score: None,
            });
        }
        Ok(())
    }

    fn insert_fixtures_if_empty(&mut self, fixtures: &[NewFixture]) -> Result<bool> {
        if !self.games.is_empty() {
            return Ok(false);
        }
        self.insert_many(fixtures)?;
        Ok(true)
    }

    fn min_unplayed_week(&self) -> Result<Option<u32>> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.home_score.is_none())
            .map(|g| g.week)
            .min())
    }

    fn games_in_week(&self, week: u32) -> Result<Vec<Game>> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.week == week)
            .cloned()
            .collect())
    }

    fn all_games(&self) -> Result<Vec<Game>> {
        let mut games = self.games.clone();
        games.sort_by_key(|g| (g.week, g.id));
        Ok(games)
    }

    fn find_by_id(&self, id: GameId) -> Result<Game> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(LeagueError::NotFound { game_id: id })
    }

    fn update_scores(&mut self, id: GameId, home: u32, away: u32) -> Result<()> {
        let game = self.game_mut(id)?;
        game.home_score = Some(home);
        game.away_score = Some(away);
        Ok(())
    }

    fn max_played_week(&self) -> Result<Option<u32>> {
        Ok(self
            .games
            .iter()
            .filter(|g| g.is_played())
            .map(|g| g.week)
            .max())
    }
}
