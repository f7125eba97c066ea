use crate::error::{LeagueError, Result};
use crate::model::{Prediction, Team};

pub const DEFAULT_MIN_WEEK: u32 = 4;

/// Title odds as each team's share of the league's total strength.
///
/// Nothing is returned until at least `min_week` weeks are fully played.
/// Probabilities are percentages rounded to two decimals.
pub fn compute_predictions(
    teams: &[Team],
    max_played_week: Option<u32>,
    min_week: u32,
) -> Result<Vec<Prediction>> {
    if max_played_week.unwrap_or(0) < min_week || teams.is_empty() {
        return Ok(Vec::new());
    }

    let total: u64 = teams.iter().map(|t| u64::from(t.strength)).sum();
    if total == 0 {
        return Err(LeagueError::Domain(
            "cannot predict: total team strength is zero".to_string(),
        ));
    }

    Ok(teams
        .iter()
        .map(|t| Prediction {
            team_id: t.id,
            probability: round2(t.strength as f64 / total as f64 * 100.0),
        })
        .collect())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
