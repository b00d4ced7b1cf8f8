//! SQLite-backed activity log.
//!
//! One append-only table of self-check answers, plus a small kv store used
//! to optionally carry the session timer across restarts. Insertion order
//! is temporal order; rows are never updated or deleted.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatabaseError;

use super::data_dir;

/// One persisted self-check answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub activity: String,
    pub productivity_score: i64,
}

/// Aggregate counts over the activity log.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogStats {
    pub total_checkins: u64,
    pub productive_checkins: u64,
    pub today_checkins: u64,
    pub today_productive: u64,
}

/// SQLite database holding the activity log.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/discipline/discipline.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()
            .map_err(|e| DatabaseError::QueryFailed(format!("data dir unavailable: {e}")))?
            .join("discipline.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS hourly_logs (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp          TEXT NOT NULL,
                activity           TEXT NOT NULL,
                productivity_score INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_hourly_logs_timestamp ON hourly_logs(timestamp);",
        )?;
        Ok(())
    }

    /// Append one self-check answer. The timestamp is assigned here, at
    /// insert time.
    ///
    /// # Errors
    /// A storage fault is fatal to this write; the entry is lost and no
    /// retry is attempted.
    pub fn record(&self, activity: &str, score: i64) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO hourly_logs (timestamp, activity, productivity_score)
             VALUES (?1, ?2, ?3)",
            params![Utc::now().to_rfc3339(), activity, score],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, score, "recorded check-in");
        Ok(id)
    }

    /// Ordered scan of the log, oldest first. `limit` keeps the newest
    /// entries when set.
    pub fn entries(&self, limit: Option<usize>) -> Result<Vec<LogEntry>, DatabaseError> {
        let sql = match limit {
            Some(_) => {
                "SELECT id, timestamp, activity, productivity_score FROM (
                    SELECT * FROM hourly_logs ORDER BY id DESC LIMIT ?1
                 ) ORDER BY id ASC"
            }
            None => "SELECT id, timestamp, activity, productivity_score FROM hourly_logs ORDER BY id ASC",
        };
        let mut stmt = self.conn.prepare(sql)?;

        let rows = match limit {
            Some(n) => stmt.query_map(params![n as i64], map_row)?,
            None => stmt.query_map([], map_row)?,
        };
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub fn stats(&self) -> Result<LogStats, DatabaseError> {
        let mut stats = LogStats::default();

        let mut stmt = self.conn.prepare(
            "SELECT COUNT(*), COALESCE(SUM(productivity_score), 0) FROM hourly_logs",
        )?;
        let (total, productive) =
            stmt.query_row([], |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)))?;
        stats.total_checkins = total;
        stats.productive_checkins = productive;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let mut stmt = self.conn.prepare(
            "SELECT COUNT(*), COALESCE(SUM(productivity_score), 0)
             FROM hourly_logs
             WHERE timestamp >= ?1",
        )?;
        let (today_total, today_productive) = stmt.query_row(
            params![format!("{today}T00:00:00+00:00")],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.today_checkins = today_total;
        stats.today_productive = today_productive;

        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogEntry> {
    let ts: String = row.get(1)?;
    let timestamp = DateTime::parse_from_rfc3339(&ts)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp,
        activity: row.get(2)?,
        productivity_score: row.get(3)?,
    })
}
