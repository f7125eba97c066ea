use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::json;

use league_sim::config::LeagueConfig;
use league_sim::model::GameId;
use league_sim::season::parse_score;
use league_sim::seed::{default_roster, load_roster, seed_teams};
use league_sim::store::SqliteStore;
use league_sim::League;

const USAGE: &str = "usage: league_sim [--db <path>] <command>

commands:
  standings                 league table
  current-week              highest fully played week
  next-week                 simulate the next unplayed week
  play-all                  simulate every remaining game
  edit <id> <home> <away>   set a game's result
  predictions               title odds (after the prediction gate)
  fixtures                  full fixture list
  reset                     wipe the database and start a new season";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Standings,
    CurrentWeek,
    NextWeek,
    PlayAll,
    Edit,
    Predictions,
    Fixtures,
    Reset,
}

impl Command {
    fn parse(name: &str) -> Result<Self> {
        Ok(match name {
            "standings" => Self::Standings,
            "current-week" => Self::CurrentWeek,
            "next-week" => Self::NextWeek,
            "play-all" => Self::PlayAll,
            "edit" => Self::Edit,
            "predictions" => Self::Predictions,
            "fixtures" => Self::Fixtures,
            "reset" => Self::Reset,
            other => return Err(anyhow!("unknown command {other:?}\n\n{USAGE}")),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LeagueConfig::from_env();
    let (db_arg, positional) = split_args(std::env::args().skip(1).collect());
    let Some(name) = positional.first() else {
        println!("{USAGE}");
        return Ok(());
    };
    let command = Command::parse(name)?;

    let db_path = db_arg
        .or_else(|| config.db_path.clone())
        .context("unable to resolve sqlite path")?;
    let mut store = SqliteStore::open(&db_path)?;

    if command == Command::Reset {
        store.clear()?;
        info!("cleared {}", db_path.display());
    }

    let roster = match &config.teams_file {
        Some(path) => load_roster(path)?,
        None => default_roster(),
    };
    seed_teams(&mut store, &roster)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut league = League::new(store, rng).with_min_prediction_week(config.min_prediction_week);
    league.bootstrap()?;

    match command {
        Command::Standings => print_data(&league.standings()?),
        Command::CurrentWeek => print_json(&json!({ "current_week": league.current_week()? })),
        Command::NextWeek => {
            let games = league.play_next_week()?;
            print_data(&league.fixture_rows(&games)?)
        }
        Command::PlayAll => {
            let games = league.play_all_weeks()?;
            print_data(&league.fixture_rows(&games)?)
        }
        Command::Edit => {
            let [id, home, away] = positional_args::<3>(&positional[1..])?;
            let id = id
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("game id must be an integer, got {id:?}"))?;
            let home = parse_score("home_score", home)?;
            let away = parse_score("away_score", away)?;
            let game = league.override_result(GameId(id), home, away)?;
            let row = league
                .fixture_rows(std::slice::from_ref(&game))?
                .into_iter()
                .next()
                .context("edited game vanished")?;
            print_json(&json!({ "data": row }))
        }
        Command::Predictions => print_data(&league.predictions()?),
        Command::Fixtures => print_data(&league.fixtures()?),
        Command::Reset => print_data(&league.fixtures()?),
    }
}

fn print_data<T: Serialize>(rows: &[T]) -> Result<()> {
    print_json(&json!({ "data": rows }))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn positional_args<const N: usize>(args: &[String]) -> Result<[&str; N]> {
    if args.len() != N {
        return Err(anyhow!("expected {N} arguments, got {}", args.len()));
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.as_str();
    }
    Ok(out)
}

/// Pull `--db <path>` / `--db=<path>` out of the argument list.
fn split_args(args: Vec<String>) -> (Option<PathBuf>, Vec<String>) {
    let mut db = None;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if let Some(path) = arg.strip_prefix("--db=") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                db = Some(PathBuf::from(trimmed));
            }
            continue;
        }
        if arg == "--db" {
            if let Some(next) = iter.next().filter(|n| !n.trim().is_empty()) {
                db = Some(PathBuf::from(next));
            }
            continue;
        }
        rest.push(arg);
    }
    (db, rest)
}
