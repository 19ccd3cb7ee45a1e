//! Case store: reporting crisis cases and listing them by priority.
//!
//! Owns the score-on-write rule: every write that sets a scoring input
//! computes `priority_score` in the same statement. Callers never pass
//! a score in.
//!
//! Status transitions are not policed. Any of the three statuses may
//! follow any other.

use crate::{
    clock::{Clock, SystemClock},
    error::{TriageError, TriageResult},
    scoring::ScoreInputs,
    store::TriageStore,
    types::{CaseId, Timestamp},
    validation::check_score_inputs,
};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ── Data structs ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Active,
    Completed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending   => "pending",
            CaseStatus::Active    => "active",
            CaseStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending"   => Ok(CaseStatus::Pending),
            "active"    => Ok(CaseStatus::Active),
            "completed" => Ok(CaseStatus::Completed),
            _ => Err(TriageError::InvalidStatus(s.to_string())),
        }
    }
}

impl ToSql for CaseStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for CaseStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e: TriageError| FromSqlError::Other(Box::new(e)))
    }
}

/// A crisis case as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id:                  CaseId,
    pub title:               String,
    pub description:         String,
    pub severity:            i64,
    pub people_affected:     i64,
    pub urgency:             i64,
    pub available_resources: i64,
    pub required_skill:      String,
    pub priority_score:      i64,
    pub status:              CaseStatus,
    pub created_at:          Timestamp,
}

impl Case {
    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            severity:            self.severity,
            people_affected:     self.people_affected,
            urgency:             self.urgency,
            available_resources: self.available_resources,
        }
    }
}

/// Caller-supplied fields for a new case report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCase {
    pub title:               String,
    pub description:         String,
    pub severity:            i64,
    pub people_affected:     i64,
    pub urgency:             i64,
    pub available_resources: i64,
    pub required_skill:      String,
}

impl NewCase {
    pub fn score_inputs(&self) -> ScoreInputs {
        ScoreInputs {
            severity:            self.severity,
            people_affected:     self.people_affected,
            urgency:             self.urgency,
            available_resources: self.available_resources,
        }
    }
}

// ── Store ────────────────────────────────────────────────────────────────────

pub struct CaseStore<'a, C: Clock = SystemClock> {
    store: &'a TriageStore,
    clock: C,
}

impl<'a> CaseStore<'a, SystemClock> {
    pub fn new(store: &'a TriageStore) -> Self {
        Self { store, clock: SystemClock }
    }
}

impl<'a, C: Clock> CaseStore<'a, C> {
    pub fn with_clock(store: &'a TriageStore, clock: C) -> Self {
        Self { store, clock }
    }

    /// Record a new case. Status starts as pending; the score is computed here.
    pub fn create(&self, report: NewCase) -> TriageResult<Case> {
        let inputs = report.score_inputs();
        if let Err(e) = check_score_inputs(&inputs) {
            log::warn!("case rejected: {e}");
            return Err(e);
        }

        let priority_score = inputs.score();
        let status = CaseStatus::Pending;
        let created_at = self.clock.now();
        let id = self
            .store
            .insert_case(&report, priority_score, status, created_at)?;

        log::info!(
            "case {id} reported: score={priority_score} severity={} urgency={} people={} resources={}",
            report.severity,
            report.urgency,
            report.people_affected,
            report.available_resources,
        );

        Ok(Case {
            id,
            title: report.title,
            description: report.description,
            severity: report.severity,
            people_affected: report.people_affected,
            urgency: report.urgency,
            available_resources: report.available_resources,
            required_skill: report.required_skill,
            priority_score,
            status,
            created_at,
        })
    }

    /// Every case, highest priority first. Equal scores keep creation order.
    pub fn list_all(&self) -> TriageResult<Vec<Case>> {
        self.store.cases_by_priority()
    }

    /// One page of the priority listing. Pages are 1-based.
    pub fn list_page(&self, page: usize, per_page: usize) -> TriageResult<Vec<Case>> {
        if page == 0 || per_page == 0 {
            return Err(TriageError::Validation(vec![
                "Page and page size must be at least 1".into(),
            ]));
        }
        let Some(offset) = (page - 1).checked_mul(per_page) else {
            return Err(TriageError::Validation(vec![format!(
                "Page {page} of size {per_page} is out of range"
            )]));
        };
        self.store.cases_by_priority_page(offset, per_page)
    }

    pub fn get(&self, id: CaseId) -> TriageResult<Case> {
        self.store
            .get_case(id)?
            .ok_or_else(|| TriageError::case_not_found(id))
    }

    /// Set a case's status from its name. Unknown names leave the case untouched.
    pub fn update_status(&self, id: CaseId, new_status: &str) -> TriageResult<Case> {
        let status = new_status.parse::<CaseStatus>().inspect_err(|e| {
            log::warn!("case {id}: status update rejected: {e}");
        })?;
        self.set_status(id, status)
    }

    pub fn set_status(&self, id: CaseId, status: CaseStatus) -> TriageResult<Case> {
        if self.store.update_case_status(id, status)? == 0 {
            return Err(TriageError::case_not_found(id));
        }
        log::info!("case {id} status -> {status}");
        self.get(id)
    }

    /// Re-assess a case. The four inputs and the recomputed score are
    /// written together.
    pub fn update_assessment(&self, id: CaseId, inputs: ScoreInputs) -> TriageResult<Case> {
        if let Err(e) = check_score_inputs(&inputs) {
            log::warn!("case {id}: assessment rejected: {e}");
            return Err(e);
        }
        let priority_score = inputs.score();
        if self.store.update_case_assessment(id, &inputs, priority_score)? == 0 {
            return Err(TriageError::case_not_found(id));
        }
        log::info!("case {id} re-assessed: score={priority_score}");
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_parse_case_insensitively() {
        assert_eq!("Pending".parse::<CaseStatus>().unwrap(), CaseStatus::Pending);
        assert_eq!(" ACTIVE ".parse::<CaseStatus>().unwrap(), CaseStatus::Active);
        assert_eq!("completed".parse::<CaseStatus>().unwrap(), CaseStatus::Completed);
    }

    #[test]
    fn unknown_status_is_invalid() {
        let err = "Bogus".parse::<CaseStatus>().unwrap_err();
        assert!(matches!(err, TriageError::InvalidStatus(ref s) if s == "Bogus"));
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&CaseStatus::Completed).unwrap(), "\"completed\"");
    }
}
