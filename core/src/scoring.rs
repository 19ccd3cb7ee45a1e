//! Priority scoring: the triage formula.
//!
//!   priority = severity×3 + people_affected×2 + urgency×4 − available_resources×2
//!
//! Urgency carries the heaviest weight, then severity, then population.
//! Resources already on hand pull the score down. The result is signed
//! and never clamped: a well-resourced, low-impact case goes negative.
//!
//! No range checks happen here. Callers validate before scoring; out-of-range
//! inputs are scored as-is, with saturating arithmetic so extreme values
//! cannot overflow.

use serde::{Deserialize, Serialize};

pub const SEVERITY_WEIGHT: i64 = 3;
pub const PEOPLE_WEIGHT: i64 = 2;
pub const URGENCY_WEIGHT: i64 = 4;
pub const RESOURCES_WEIGHT: i64 = 2;

/// Compute the priority score for a case.
pub fn priority_score(
    severity: i64,
    people_affected: i64,
    urgency: i64,
    available_resources: i64,
) -> i64 {
    severity
        .saturating_mul(SEVERITY_WEIGHT)
        .saturating_add(people_affected.saturating_mul(PEOPLE_WEIGHT))
        .saturating_add(urgency.saturating_mul(URGENCY_WEIGHT))
        .saturating_sub(available_resources.saturating_mul(RESOURCES_WEIGHT))
}

/// The four fields of a case that feed the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub severity:            i64,
    pub people_affected:     i64,
    pub urgency:             i64,
    pub available_resources: i64,
}

impl ScoreInputs {
    pub fn score(&self) -> i64 {
        priority_score(
            self.severity,
            self.people_affected,
            self.urgency,
            self.available_resources,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_population_dominates() {
        // 15 + 2000 + 20 - 20
        assert_eq!(priority_score(5, 1000, 5, 10), 2015);
    }

    #[test]
    fn resources_can_drive_score_negative() {
        // 3 + 0 + 4 - 200
        assert_eq!(priority_score(1, 0, 1, 100), -193);
    }

    #[test]
    fn deterministic_over_valid_domain() {
        for severity in 1..=5 {
            for urgency in 1..=5 {
                for people in [0, 1, 7, 250] {
                    for resources in [0, 3, 40] {
                        let a = priority_score(severity, people, urgency, resources);
                        let b = priority_score(severity, people, urgency, resources);
                        assert_eq!(a, b);
                        assert_eq!(
                            a,
                            severity * 3 + people * 2 + urgency * 4 - resources * 2
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn urgency_outweighs_severity() {
        let base = ScoreInputs { severity: 3, people_affected: 0, urgency: 3, available_resources: 0 };
        let more_urgent = ScoreInputs { urgency: 4, ..base };
        let more_severe = ScoreInputs { severity: 4, ..base };
        assert!(more_urgent.score() > more_severe.score());
    }

    #[test]
    fn out_of_range_inputs_do_not_panic() {
        assert_eq!(priority_score(0, 0, 0, 0), 0);
        assert_eq!(priority_score(-2, 0, 9, 0), -6 + 36);
        assert_eq!(priority_score(i64::MAX, i64::MAX, 5, 0), i64::MAX);
        assert_eq!(priority_score(1, 0, 1, i64::MAX), i64::MIN + 8);
    }
}
