use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app_dirs::AppDirs;
use crate::major_number::MajorNumber;
use crate::performance::NumberPerformance;

/// Aggregated history for one displayed number ("07" and "7" are separate rows)
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSummary {
    pub display: String,
    pub value: u8,
    pub is_zero_padded: bool,
    pub avg_response_ms: f64,
    pub min_response_ms: f64,
    pub max_response_ms: f64,
    pub attempts: i64,
    pub last_seen: Option<DateTime<Utc>>,
}

impl NumberSummary {
    /// The number this row aggregates, for re-rendering under another format
    pub fn number(&self) -> Option<MajorNumber> {
        MajorNumber::new(i32::from(self.value), self.is_zero_padded).ok()
    }
}

/// Persistent log of every recall, one row per presented number
#[derive(Debug)]
pub struct HistoryDb {
    conn: Connection,
}

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS number_history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number_display TEXT NOT NULL,
        value INTEGER NOT NULL,
        is_zero_padded BOOLEAN NOT NULL,
        response_ms REAL NOT NULL,
        presented_at TEXT NOT NULL,
        session_range TEXT NOT NULL,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS idx_number_history_display ON number_history(number_display);
    CREATE INDEX IF NOT EXISTS idx_number_history_presented ON number_history(presented_at);
"#;

impl HistoryDb {
    /// Open the database at the default state location
    pub fn new() -> Result<Self> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("mnemo_history.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        debug!(path = %path.display(), "opening history database");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Store a finished session in one transaction
    pub fn record_session(
        &mut self,
        performances: &[NumberPerformance],
        range: &str,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO number_history
                (number_display, value, is_zero_padded, response_ms, presented_at, session_range)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;

            for p in performances {
                let number = p.number();
                stmt.execute(params![
                    number.display(),
                    number.value(),
                    number.is_zero_padded(),
                    p.response_ms(),
                    p.presented_at().to_rfc3339(),
                    range,
                ])?;
            }
        }
        tx.commit()?;

        debug!(count = performances.len(), range, "recorded session history");
        Ok(())
    }

    /// Per-number aggregates, in canonical order (padded bucket first)
    pub fn number_summary(&self) -> Result<Vec<NumberSummary>> {
        self.query_summary(
            r#"
            SELECT number_display, value, is_zero_padded,
                   AVG(response_ms), MIN(response_ms), MAX(response_ms),
                   COUNT(*), MAX(presented_at)
            FROM number_history
            GROUP BY number_display
            ORDER BY is_zero_padded DESC, value ASC
            "#,
            [],
        )
    }

    /// Numbers with the highest average recall time
    pub fn slowest_numbers(&self, limit: usize) -> Result<Vec<NumberSummary>> {
        self.query_summary(
            r#"
            SELECT number_display, value, is_zero_padded,
                   AVG(response_ms) AS avg_ms, MIN(response_ms), MAX(response_ms),
                   COUNT(*), MAX(presented_at)
            FROM number_history
            GROUP BY number_display
            ORDER BY avg_ms DESC
            LIMIT ?1
            "#,
            [limit as i64],
        )
    }

    fn query_summary<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<NumberSummary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            let last_seen: Option<String> = row.get(7)?;
            Ok(NumberSummary {
                display: row.get(0)?,
                value: row.get(1)?,
                is_zero_padded: row.get(2)?,
                avg_response_ms: row.get(3)?,
                min_response_ms: row.get(4)?,
                max_response_ms: row.get(5)?,
                attempts: row.get(6)?,
                last_seen: last_seen
                    .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                    .map(|t| t.with_timezone(&Utc)),
            })
        })?;

        rows.collect()
    }

    pub fn total_attempts(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM number_history", [], |row| row.get(0))
    }

    /// Clear all history (for testing or reset purposes)
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM number_history", [])?;
        Ok(())
    }
}
