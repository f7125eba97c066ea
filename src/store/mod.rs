//! Persistence contracts for teams and games, plus two backends.

pub mod memory;
pub mod sqlite;

use crate::error::Result;
use crate::model::{Game, GameId, NewFixture, Team, TeamId, TeamWithGames};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub trait TeamStore {
    fn list_team_ids(&self) -> Result<Vec<TeamId>>;

    fn list_teams(&self) -> Result<Vec<Team>>;

    /// Every team together with the games it plays in, home or away.
    fn list_teams_with_games(&self) -> Result<Vec<TeamWithGames>>;

    fn insert_team(&mut self, name: &str, strength: u32) -> Result<Team>;
}

pub trait GameStore {
    fn count(&self) -> Result<usize>;

    fn insert_many(&mut self, fixtures: &[NewFixture]) -> Result<()>;

    /// Insert the schedule only when no games exist yet, as one step.
    /// Returns `false` when games were already present.
    fn insert_fixtures_if_empty(&mut self, fixtures: &[NewFixture]) -> Result<bool>;

    /// Lowest week holding a game without a home score.
    fn min_unplayed_week(&self) -> Result<Option<u32>>;

    fn games_in_week(&self, week: u32) -> Result<Vec<Game>>;

    /// All games ordered by week, then id.
    fn all_games(&self) -> Result<Vec<Game>>;

    fn find_by_id(&self, id: GameId) -> Result<Game>;

    fn update_scores(&mut self, id: GameId, home: u32, away: u32) -> Result<()>;

    /// Highest week holding a game with both scores set.
    fn max_played_week(&self) -> Result<Option<u32>>;
}
