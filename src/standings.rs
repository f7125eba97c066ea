use std::cmp::Ordering;

use crate::model::{Game, Standing, TeamId, TeamWithGames};

const POINTS_WIN: u32 = 3;
const POINTS_DRAW: u32 = 1;

/// Build the league table from scratch.
///
/// A game counts for a team once that team's own score is set; the opponent's
/// missing score is read as 0. Rows are ordered by points, then goal
/// difference. Teams level on both keep their input order.
pub fn compute_standings(teams: &[TeamWithGames]) -> Vec<Standing> {
    let mut table: Vec<Standing> = teams.iter().map(standing_for).collect();
    table.sort_by(rank);
    table
}

fn standing_for(entry: &TeamWithGames) -> Standing {
    let team_id = entry.team.id;
    let mut row = Standing::empty(&entry.team);

    for game in &entry.games {
        let Some((goals_for, goals_against)) = goals_for_team(game, team_id) else {
            continue;
        };

        row.played += 1;
        row.goals_for += u64::from(goals_for);
        row.goals_against += u64::from(goals_against);
        match goals_for.cmp(&goals_against) {
            Ordering::Greater => {
                row.won += 1;
                row.points += POINTS_WIN;
            }
            Ordering::Equal => {
                row.drawn += 1;
                row.points += POINTS_DRAW;
            }
            Ordering::Less => row.lost += 1,
        }
    }

    row.goal_difference = signed(row.goals_for) - signed(row.goals_against);
    row
}

fn signed(goals: u64) -> i64 {
    i64::try_from(goals).unwrap_or(i64::MAX)
}

fn goals_for_team(game: &Game, team_id: TeamId) -> Option<(u32, u32)> {
    if game.home_team_id == team_id {
        let scored = game.home_score?;
        Some((scored, game.away_score.unwrap_or(0)))
    } else if game.away_team_id == team_id {
        let scored = game.away_score?;
        Some((scored, game.home_score.unwrap_or(0)))
    } else {
        None
    }
}

fn rank(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
}
