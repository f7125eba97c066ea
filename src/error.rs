use thiserror::Error;

use crate::model::GameId;

pub type Result<T, E = LeagueError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("game {game_id} not found")]
    NotFound { game_id: GameId },

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Domain(String),

    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl LeagueError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LeagueError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LeagueError::Validation(_))
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, LeagueError::Domain(_))
    }
}
