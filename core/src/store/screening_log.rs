//! Screening audit log queries.

use super::{DeskStore, ScreeningLogRow};
use crate::{error::DeskResult, screening::ScreeningMatch, types::ScreeningId};
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

impl DeskStore {
    /// Record one screening and its matches. Returns the new screening id.
    pub fn record_screening(
        &self,
        query: &str,
        matches: &[ScreeningMatch],
        screened_at: DateTime<Utc>,
    ) -> DeskResult<ScreeningId> {
        let screening_id = format!("scr-{}", Uuid::new_v4());
        let payload = serde_json::to_string(matches)?;
        let top_confidence = matches.iter().map(|m| m.confidence).max();

        self.conn.execute(
            "INSERT INTO screening_log
             (screening_id, query, screened_at, match_count, top_confidence, payload)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                screening_id,
                query,
                screened_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                matches.len() as i64,
                top_confidence,
                payload,
            ],
        )?;

        info!(
            "Recorded screening {screening_id} for '{query}' ({} match(es))",
            matches.len()
        );
        Ok(screening_id)
    }

    pub fn screening_by_id(&self, screening_id: &str) -> DeskResult<Option<ScreeningLogRow>> {
        let row = self
            .conn
            .query_row(
                "SELECT screening_id, query, screened_at, match_count, top_confidence, payload
                 FROM screening_log WHERE screening_id = ?1",
                params![screening_id],
                map_log_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Most recent screenings first.
    pub fn recent_screenings(&self, limit: usize) -> DeskResult<Vec<ScreeningLogRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT screening_id, query, screened_at, match_count, top_confidence, payload
             FROM screening_log
             ORDER BY seq DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], map_log_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn screening_count(&self) -> DeskResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM screening_log", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Screenings that returned at least one match.
    pub fn hit_count(&self) -> DeskResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM screening_log WHERE match_count > 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn map_log_row(row: &Row<'_>) -> rusqlite::Result<ScreeningLogRow> {
    Ok(ScreeningLogRow {
        screening_id: row.get(0)?,
        query: row.get(1)?,
        screened_at: row.get(2)?,
        match_count: row.get(3)?,
        top_confidence: row.get(4)?,
        payload: row.get(5)?,
    })
}
