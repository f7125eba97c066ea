use crate::model::{NewFixture, TeamId};

/// Build a double round-robin schedule with the circle method.
///
/// Odd team counts get a bye slot; pairings against the bye are dropped, so
/// the team drawn against it sits that week out. The second half of the season
/// replays the first half's pairings with home and away swapped. Fewer than two
/// teams produce an empty schedule.
pub fn generate_fixtures(team_ids: &[TeamId]) -> Vec<NewFixture> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    let mut order: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if order.len() % 2 != 0 {
        order.push(None);
    }

    let n = order.len();
    let half_rounds = n - 1;
    let rounds = half_rounds * 2;
    let mut fixtures = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1));

    for round in 0..rounds {
        let week = (round + 1) as u32;
        for i in 0..n / 2 {
            let (Some(mut home), Some(mut away)) = (order[i], order[n - 1 - i]) else {
                continue;
            };
            if round >= half_rounds {
                std::mem::swap(&mut home, &mut away);
            }
            fixtures.push(NewFixture {
                week,
                home_team_id: home,
                away_team_id: away,
            });
        }
        rotate(&mut order);
    }

    fixtures
}

/// Position 0 stays put; the last slot moves to position 1 and the rest shift right.
fn rotate(order: &mut [Option<TeamId>]) {
    if order.len() > 2 {
        order[1..].rotate_right(1);
    }
}
