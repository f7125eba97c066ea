use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};

use crate::error::{LeagueError, Result};
use crate::model::{Game, GameId, NewFixture, Team, TeamId, TeamWithGames};
use crate::store::{GameStore, TeamStore};

const GAME_COLUMNS: &str = "id, week, home_team_id, away_team_id, home_score, away_score";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create db dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .context("enable WAL journal")?;
        debug!("opened {} (journal_mode={mode})", path.display());
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Drop every game and team. Ids start again at 1 afterwards.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        let tx = self.conn.transaction().context("begin clear transaction")?;
        tx.execute("DELETE FROM games", [])
            .context("delete games")?;
        tx.execute("DELETE FROM teams", [])
            .context("delete teams")?;
        tx.execute(
            "DELETE FROM sqlite_sequence WHERE name IN ('games', 'teams')",
            [],
        )
        .context("reset id sequences")?;
        tx.commit().context("commit clear transaction")?;
        Ok(())
    }

    fn query_games(&self, sql: &str, week: Option<u32>) -> Result<Vec<Game>> {
        let mut stmt = self
            .conn
            .prepare_cached(sql)
            .context("prepare games query")?;
        let rows = match week {
            Some(week) => stmt.query_map(params![week], game_from_row),
            None => stmt.query_map([], game_from_row),
        }
        .context("query games")?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("decode game row")?);
        }
        Ok(out)
    }
}

pub fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            strength INTEGER NOT NULL DEFAULT 50,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            home_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            away_team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
            week INTEGER NOT NULL,
            home_score INTEGER NULL,
            away_score INTEGER NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE(home_team_id, away_team_id, week)
        );
        CREATE INDEX IF NOT EXISTS idx_games_week ON games(week);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

impl TeamStore for SqliteStore {
    fn list_team_ids(&self) -> Result<Vec<TeamId>> {
        Ok(self.list_teams()?.into_iter().map(|t| t.id).collect())
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, strength FROM teams ORDER BY id ASC")
            .context("prepare teams query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Team {
                    id: TeamId(row.get(0)?),
                    name: row.get(1)?,
                    strength: row.get(2)?,
                })
            })
            .context("query teams")?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("decode team row")?);
        }
        Ok(out)
    }

    fn list_teams_with_games(&self) -> Result<Vec<TeamWithGames>> {
        let teams = self.list_teams()?;
        let games = self.all_games()?;

        let mut by_team: HashMap<TeamId, Vec<Game>> = HashMap::new();
        for game in games {
            by_team
                .entry(game.home_team_id)
                .or_default()
                .push(game.clone());
            if game.away_team_id != game.home_team_id {
                by_team.entry(game.away_team_id).or_default().push(game);
            }
        }

        Ok(teams
            .into_iter()
            .map(|team| {
                let games = by_team.remove(&team.id).unwrap_or_default();
                TeamWithGames { team, games }
            })
            .collect())
    }

    fn insert_team(&mut self, name: &str, strength: u32) -> Result<Team> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO teams(name, strength, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![name, strength, now],
            )
            .with_context(|| format!("insert team {name}"))?;
        Ok(Team {
            id: TeamId(self.conn.last_insert_rowid()),
            name: name.to_string(),
            strength,
        })
    }
}

impl GameStore for SqliteStore {
    fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .context("count games")?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    fn insert_many(&mut self, fixtures: &[NewFixture]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("begin fixtures transaction")?;
        insert_fixture_rows(&tx, fixtures)?;
        tx.commit().context("commit fixtures transaction")?;
        debug!("inserted {} fixtures", fixtures.len());
        Ok(())
    }

    fn insert_fixtures_if_empty(&mut self, fixtures: &[NewFixture]) -> Result<bool> {
        // IMMEDIATE takes the write lock before the count, so two processes
        // bootstrapping the same file cannot both see an empty table.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("begin bootstrap transaction")?;
        let existing: i64 = tx
            .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
            .context("count games")?;
        if existing > 0 {
            return Ok(false);
        }
        insert_fixture_rows(&tx, fixtures)?;
        tx.commit().context("commit bootstrap transaction")?;
        debug!("bootstrapped season with {} fixtures", fixtures.len());
        Ok(true)
    }

    fn min_unplayed_week(&self) -> Result<Option<u32>> {
        let week = self
            .conn
            .query_row(
                "SELECT MIN(week) FROM games WHERE home_score IS NULL",
                [],
                |row| row.get::<_, Option<u32>>(0),
            )
            .context("query min unplayed week")?;
        Ok(week)
    }

    fn games_in_week(&self, week: u32) -> Result<Vec<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE week = ?1 ORDER BY id ASC");
        self.query_games(&sql, Some(week))
    }

    fn all_games(&self) -> Result<Vec<Game>> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games ORDER BY week ASC, id ASC");
        self.query_games(&sql, None)
    }

    fn find_by_id(&self, id: GameId) -> Result<Game> {
        let sql = format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1");
        self.conn
            .query_row(&sql, params![id.0], game_from_row)
            .optional()
            .with_context(|| format!("load game {id}"))?
            .ok_or(LeagueError::NotFound { game_id: id })
    }

    fn update_scores(&mut self, id: GameId, home: u32, away: u32) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE games SET home_score = ?1, away_score = ?2, updated_at = ?3 WHERE id = ?4",
                params![home, away, Utc::now().to_rfc3339(), id.0],
            )
            .with_context(|| format!("update scores for game {id}"))?;
        if changed == 0 {
            return Err(LeagueError::NotFound { game_id: id });
        }
        Ok(())
    }

    fn max_played_week(&self) -> Result<Option<u32>> {
        let week = self
            .conn
            .query_row(
                "SELECT MAX(week) FROM games WHERE home_score IS NOT NULL AND away_score IS NOT NULL",
                [],
                |row| row.get::<_, Option<u32>>(0),
            )
            .context("query max played week")?;
        Ok(week)
    }
}

fn insert_fixture_rows(tx: &Transaction<'_>, fixtures: &[NewFixture]) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = tx
        .prepare_cached(
            "INSERT INTO games(home_team_id, away_team_id, week, home_score, away_score, created_at, updated_at)
             VALUES (?1, ?2, ?3, NULL, NULL, ?4, ?4)",
        )
        .context("prepare fixture insert")?;
    for f in fixtures {
        stmt.execute(params![f.home_team_id.0, f.away_team_id.0, f.week, now])
            .with_context(|| {
                format!(
                    "insert fixture week {} {} v {}",
                    f.week, f.home_team_id, f.away_team_id
                )
            })?;
    }
    Ok(())
}

fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: GameId(row.get(0)?),
        week: row.get(1)?,
        home_team_id: TeamId(row.get(2)?),
        away_team_id: TeamId(row.get(3)?),
        home_score: row.get(4)?,
        away_score: row.get(5)?,
    })
}
