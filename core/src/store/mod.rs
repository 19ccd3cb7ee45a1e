//! SQLite persistence layer.
//!
//! RULE: Only store/ talks to the database.
//! CaseStore and VolunteerStore call these methods; they never execute SQL directly.
//!
//! One `TriageStore` wraps one connection and is passed by reference to every
//! store that needs it. Statements are prepared and dropped inside each call.

use crate::{error::TriageResult, scoring::ScoreInputs, types::CaseId};
mod case;
mod volunteer;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

pub struct TriageStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_cases:           i64,
    pub high_priority_cases:   i64,
    pub active_cases:          i64,
    pub completed_cases:       i64,
    pub registered_volunteers: i64,
    pub available_volunteers:  i64,
    /// Completed over total cases, percent to one decimal. 0 with no cases.
    pub resolution_rate:       f64,
    /// Active cases over available volunteers, percent to one decimal,
    /// capped at 100. 0 with no available volunteers.
    pub volunteer_utilization: f64,
}

/// `part / whole` as a percentage rounded to one decimal; 0 when `whole` is 0.
fn percent(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

impl TriageStore {
    pub fn open(path: &str) -> TriageResult<Self> {
        if path == ":memory:" {
            return Self::in_memory();
        }
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        log::debug!("opened database {path}");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TriageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, path: None })
    }

    /// Open and migrate in one step.
    pub fn open_migrated(path: &str) -> TriageResult<Self> {
        let store = Self::open(path)?;
        store.migrate()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Apply all schema migrations in order. Safe to run repeatedly.
    pub fn migrate(&self) -> TriageResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_crisis_case.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_volunteer.sql"))?;
        log::debug!("schema migrations applied");
        Ok(())
    }

    // ── Dashboard ──────────────────────────────────────────────

    pub fn dashboard_stats(&self, high_priority_threshold: i64) -> TriageResult<DashboardStats> {
        let (total_cases, high_priority_cases, active_cases, completed_cases) =
            self.conn.query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(priority_score >= ?1), 0),
                        COALESCE(SUM(status = 'active'), 0),
                        COALESCE(SUM(status = 'completed'), 0)
                 FROM crisis_case",
                params![high_priority_threshold],
                |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?, r.get::<_, i64>(2)?, r.get::<_, i64>(3)?)),
            )?;
        let (registered_volunteers, available_volunteers) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(available), 0) FROM volunteer",
            [],
            |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)),
        )?;
        Ok(DashboardStats {
            total_cases,
            high_priority_cases,
            active_cases,
            completed_cases,
            registered_volunteers,
            available_volunteers,
            resolution_rate: percent(completed_cases, total_cases),
            volunteer_utilization: percent(active_cases, available_volunteers).min(100.0),
        })
    }

    // ── Score repair ───────────────────────────────────────────

    /// Rewrite every stored score that disagrees with its inputs.
    /// Returns the number of rows changed. All-or-nothing.
    pub fn recompute_priority_scores(&self) -> TriageResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let stale: Vec<(CaseId, i64)> = {
            let mut stmt = tx.prepare(
                "SELECT id, severity, people_affected, urgency, available_resources,
                        priority_score
                 FROM crisis_case ORDER BY id",
            )?;
            let rows = stmt.query_map([], |r| {
                let inputs = ScoreInputs {
                    severity:            r.get(1)?,
                    people_affected:     r.get(2)?,
                    urgency:             r.get(3)?,
                    available_resources: r.get(4)?,
                };
                Ok((r.get::<_, i64>(0)?, inputs, r.get::<_, i64>(5)?))
            })?;
            let mut stale = Vec::new();
            for row in rows {
                let (id, inputs, stored) = row?;
                let fresh = inputs.score();
                if fresh != stored {
                    stale.push((id, fresh));
                }
            }
            stale
        };
        for (id, score) in &stale {
            tx.execute(
                "UPDATE crisis_case SET priority_score = ?1 WHERE id = ?2",
                params![score, id],
            )?;
        }
        tx.commit()?;
        if !stale.is_empty() {
            log::info!("recomputed {} stale priority scores", stale.len());
        }
        Ok(stale.len())
    }
}
