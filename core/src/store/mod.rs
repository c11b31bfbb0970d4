//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Screening and review code never executes SQL directly.

mod screening_log;

use crate::error::DeskResult;
use rusqlite::Connection;

pub struct DeskStore {
    conn: Connection,
}

/// One recorded screening, as read back from the log.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningLogRow {
    pub screening_id: String,
    pub query: String,
    /// RFC 3339, UTC.
    pub screened_at: String,
    pub match_count: i64,
    pub top_confidence: Option<u8>,
    /// JSON array of the matches as returned to the caller.
    pub payload: String,
}

impl DeskStore {
    pub fn open(path: &str) -> DeskResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_screening_log.sql"))?;
        Ok(())
    }
}
