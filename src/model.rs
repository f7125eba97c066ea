use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub strength: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub week: u32,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl Game {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team_id == team || self.away_team_id == team
    }
}

/// A fixture that has been scheduled but not yet stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewFixture {
    pub week: u32,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamWithGames {
    pub team: Team,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    #[serde(rename = "for")]
    pub goals_for: u64,
    #[serde(rename = "against")]
    pub goals_against: u64,
    #[serde(rename = "gd")]
    pub goal_difference: i64,
    pub points: u32,
}

impl Standing {
    pub fn empty(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub team_id: TeamId,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

/// A game joined with the names of both sides, as shown in fixture lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRow {
    pub id: GameId,
    pub week: u32,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}
