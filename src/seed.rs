use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::model::Team;
use crate::store::TeamStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub name: String,
    #[serde(default = "default_strength")]
    pub strength: u32,
}

fn default_strength() -> u32 {
    50
}

pub fn default_roster() -> Vec<TeamSeed> {
    [
        ("Chelsea", 90),
        ("Arsenal", 85),
        ("Manchester City", 88),
        ("Liverpool", 87),
    ]
    .into_iter()
    .map(|(name, strength)| TeamSeed {
        name: name.to_string(),
        strength,
    })
    .collect()
}

/// Read a `[{"name": .., "strength": ..}]` roster.
pub fn load_roster(path: &Path) -> Result<Vec<TeamSeed>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read teams file {}", path.display()))?;
    parse_roster(&raw).with_context(|| format!("parse teams file {}", path.display()))
}

pub fn parse_roster(raw: &str) -> Result<Vec<TeamSeed>> {
    let roster: Vec<TeamSeed> = serde_json::from_str(raw.trim()).context("invalid roster json")?;
    if let Some(blank) = roster.iter().position(|t| t.name.trim().is_empty()) {
        return Err(anyhow!("roster entry {blank} has an empty name"));
    }
    Ok(roster)
}

/// Insert the roster into an empty team table. Existing teams are left alone.
pub fn seed_teams<S: TeamStore>(store: &mut S, roster: &[TeamSeed]) -> Result<Vec<Team>> {
    let existing = store.list_teams()?;
    if !existing.is_empty() {
        return Ok(existing);
    }
    let mut out = Vec::with_capacity(roster.len());
    for entry in roster {
        out.push(store.insert_team(entry.name.trim(), entry.strength)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{default_roster, parse_roster, seed_teams};
    use crate::store::{MemoryStore, TeamStore};

    #[test]
    fn roster_strength_defaults_to_fifty() {
        let roster = parse_roster(r#"[{"name":"Leeds"},{"name":"Spurs","strength":70}]"#)
            .expect("roster should parse");
        assert_eq!(roster[0].strength, 50);
        assert_eq!(roster[1].strength, 70);
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(parse_roster(r#"[{"name":"  "}]"#).is_err());
        assert!(parse_roster("not json").is_err());
    }

    #[test]
    fn seeding_is_skipped_when_teams_exist() {
        let mut store = MemoryStore::new();
        let first = seed_teams(&mut store, &default_roster()).unwrap();
        assert_eq!(first.len(), 4);
        let second = seed_teams(&mut store, &default_roster()).unwrap();
        assert_eq!(second, first);
        assert_eq!(store.list_teams().unwrap().len(), 4);
    }
}
