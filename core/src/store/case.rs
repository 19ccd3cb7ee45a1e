//! crisis_case table queries.

use super::TriageStore;
use crate::{
    case_store::{Case, CaseStatus, NewCase},
    error::{TriageError, TriageResult},
    scoring::ScoreInputs,
    types::{CaseId, Timestamp},
};
use rusqlite::{params, OptionalExtension, Row};

const CASE_COLUMNS: &str = "id, title, description, severity, people_affected, urgency,
     available_resources, required_skill, priority_score, status, created_at";

fn case_from_row(r: &Row<'_>) -> rusqlite::Result<Case> {
    Ok(Case {
        id:                  r.get(0)?,
        title:               r.get(1)?,
        description:         r.get(2)?,
        severity:            r.get(3)?,
        people_affected:     r.get(4)?,
        urgency:             r.get(5)?,
        available_resources: r.get(6)?,
        required_skill:      r.get(7)?,
        priority_score:      r.get(8)?,
        status:              r.get(9)?,
        created_at:          r.get(10)?,
    })
}

impl TriageStore {
    pub(crate) fn insert_case(
        &self,
        c: &NewCase,
        priority_score: i64,
        status: CaseStatus,
        created_at: Timestamp,
    ) -> TriageResult<CaseId> {
        self.conn.execute(
            "INSERT INTO crisis_case (
                title, description, severity, people_affected, urgency,
                available_resources, required_skill, priority_score, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                &c.title,
                &c.description,
                c.severity,
                c.people_affected,
                c.urgency,
                c.available_resources,
                &c.required_skill,
                priority_score,
                status,
                created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_case(&self, id: CaseId) -> TriageResult<Option<Case>> {
        let sql = format!("SELECT {CASE_COLUMNS} FROM crisis_case WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id], case_from_row)
            .optional()?;
        log::debug!("get_case {id}: found={}", row.is_some());
        Ok(row)
    }

    /// Highest score first; ids break ties, so creation order is kept.
    pub fn cases_by_priority(&self) -> TriageResult<Vec<Case>> {
        let sql = format!(
            "SELECT {CASE_COLUMNS} FROM crisis_case
             ORDER BY priority_score DESC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], case_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn cases_by_priority_page(&self, offset: usize, limit: usize) -> TriageResult<Vec<Case>> {
        // SQLite reads a negative LIMIT or OFFSET as "unbounded", so never let one through.
        let (Ok(offset), Ok(limit)) = (i64::try_from(offset), i64::try_from(limit)) else {
            return Err(TriageError::Validation(vec![
                "Page window is out of range".into(),
            ]));
        };
        let sql = format!(
            "SELECT {CASE_COLUMNS} FROM crisis_case
             ORDER BY priority_score DESC, id ASC
             LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit, offset], case_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Returns the number of rows changed (0 when the id is unknown).
    pub(crate) fn update_case_status(&self, id: CaseId, status: CaseStatus) -> TriageResult<usize> {
        let n = self.conn.execute(
            "UPDATE crisis_case SET status = ?1 WHERE id = ?2",
            params![status, id],
        )?;
        Ok(n)
    }

    /// Inputs and score land in one statement, so no reader sees a stale score.
    pub(crate) fn update_case_assessment(
        &self,
        id: CaseId,
        inputs: &ScoreInputs,
        priority_score: i64,
    ) -> TriageResult<usize> {
        let n = self.conn.execute(
            "UPDATE crisis_case
             SET severity = ?1, people_affected = ?2, urgency = ?3,
                 available_resources = ?4, priority_score = ?5
             WHERE id = ?6",
            params![
                inputs.severity,
                inputs.people_affected,
                inputs.urgency,
                inputs.available_resources,
                priority_score,
                id,
            ],
        )?;
        Ok(n)
    }

    pub fn case_count(&self) -> TriageResult<i64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM crisis_case", [], |r| r.get(0))?;
        Ok(n)
    }

    /// Overwrite a stored score directly, bypassing the formula.
    #[cfg(test)]
    pub(crate) fn force_case_score(&self, id: CaseId, priority_score: i64) -> TriageResult<()> {
        self.conn.execute(
            "UPDATE crisis_case SET priority_score = ?1 WHERE id = ?2",
            params![priority_score, id],
        )?;
        Ok(())
    }
}
