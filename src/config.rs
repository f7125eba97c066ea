use std::env;
use std::path::PathBuf;

use crate::predictor::DEFAULT_MIN_WEEK;

const CACHE_DIR: &str = "league_sim";
const DB_FILE: &str = "league.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub db_path: Option<PathBuf>,
    pub min_prediction_week: u32,
    pub seed: Option<u64>,
    pub teams_file: Option<PathBuf>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            min_prediction_week: DEFAULT_MIN_WEEK,
            seed: None,
            teams_file: None,
        }
    }
}

impl LeagueConfig {
    /// Load `.env.local` / `.env` (if present) and read `LEAGUE_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let db_path = non_empty(lookup("LEAGUE_DB_PATH"))
            .map(PathBuf::from)
            .or(defaults.db_path);
        let min_prediction_week = lookup("LEAGUE_PREDICTION_MIN_WEEK")
            .and_then(|val| val.trim().parse::<u32>().ok())
            .unwrap_or(defaults.min_prediction_week);
        let seed = lookup("LEAGUE_SEED").and_then(|val| val.trim().parse::<u64>().ok());
        let teams_file = non_empty(lookup("LEAGUE_TEAMS_FILE")).map(PathBuf::from);

        Self {
            db_path,
            min_prediction_week,
            seed,
            teams_file,
        }
    }
}

pub fn default_db_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Some(base) = non_empty(env::var("XDG_CACHE_HOME").ok()) {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(DB_FILE));
    }
    let home = non_empty(env::var("HOME").ok())?;
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(DB_FILE),
    )
}

fn non_empty(val: Option<String>) -> Option<String> {
    val.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::LeagueConfig;

    fn config(pairs: &[(&str, &str)]) -> LeagueConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        LeagueConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn reads_league_variables() {
        let cfg = config(&[
            ("LEAGUE_DB_PATH", "/tmp/league.db"),
            ("LEAGUE_PREDICTION_MIN_WEEK", "2"),
            ("LEAGUE_SEED", "1234"),
            ("LEAGUE_TEAMS_FILE", "teams.json"),
        ]);
        assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/league.db")));
        assert_eq!(cfg.min_prediction_week, 2);
        assert_eq!(cfg.seed, Some(1234));
        assert_eq!(cfg.teams_file, Some(PathBuf::from("teams.json")));
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let cfg = config(&[("LEAGUE_PREDICTION_MIN_WEEK", "soon"), ("LEAGUE_SEED", "-3")]);
        assert_eq!(cfg.min_prediction_week, 4);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.teams_file, None);
    }
}
