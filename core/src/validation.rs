//! Report validation.
//!
//! Two layers:
//!   - `validate_case_report` / `validate_volunteer_registration`: full
//!     checks on caller-supplied reports. Every failure is collected, and
//!     the cleaned (trimmed) report is returned on success.
//!   - `check_score_inputs`: the domain checks the stores themselves
//!     enforce before any write touching a scoring input.

use crate::{
    case_store::NewCase,
    config::ValidationLimits,
    error::{TriageError, TriageResult},
    scoring::ScoreInputs,
    volunteer_store::NewVolunteer,
};

pub const LEVEL_MIN: i64 = 1;
pub const LEVEL_MAX: i64 = 5;

fn check_text(
    errors: &mut Vec<String>,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) -> String {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        errors.push(format!("{label} is required"));
    } else if len < min {
        errors.push(format!("{label} must be at least {min} characters"));
    } else if len > max {
        errors.push(format!("{label} must not exceed {max} characters"));
    }
    trimmed.to_string()
}

fn check_level(errors: &mut Vec<String>, label: &str, value: i64) {
    if !(LEVEL_MIN..=LEVEL_MAX).contains(&value) {
        errors.push(format!("{label} must be between {LEVEL_MIN} and {LEVEL_MAX}"));
    }
}

fn check_count(errors: &mut Vec<String>, label: &str, value: i64, max: Option<i64>) {
    if value < 0 {
        errors.push(format!("{label} cannot be negative"));
    } else if let Some(max) = max {
        if value > max {
            errors.push(format!("{label} exceeds maximum value of {max}"));
        }
    }
}

fn into_result<T>(errors: Vec<String>, value: T) -> TriageResult<T> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(TriageError::Validation(errors))
    }
}

/// Domain checks on the scoring inputs: levels in [1,5], counts non-negative.
pub fn check_score_inputs(inputs: &ScoreInputs) -> TriageResult<()> {
    let mut errors = Vec::new();
    check_level(&mut errors, "Severity", inputs.severity);
    check_level(&mut errors, "Urgency", inputs.urgency);
    check_count(&mut errors, "People affected", inputs.people_affected, None);
    check_count(&mut errors, "Available resources", inputs.available_resources, None);
    into_result(errors, ())
}

pub fn validate_case_report(report: &NewCase, limits: &ValidationLimits) -> TriageResult<NewCase> {
    let mut errors = Vec::new();

    let title = check_text(&mut errors, "Title", &report.title, limits.title_min, limits.title_max);
    let description = check_text(
        &mut errors,
        "Description",
        &report.description,
        limits.description_min,
        limits.description_max,
    );
    check_level(&mut errors, "Severity", report.severity);
    check_level(&mut errors, "Urgency", report.urgency);
    check_count(
        &mut errors,
        "People affected",
        report.people_affected,
        Some(limits.max_people_affected),
    );
    check_count(
        &mut errors,
        "Available resources",
        report.available_resources,
        Some(limits.max_available_resources),
    );
    let required_skill = check_text(
        &mut errors,
        "Required skill",
        &report.required_skill,
        limits.required_skill_min,
        limits.required_skill_max,
    );

    into_result(
        errors,
        NewCase {
            title,
            description,
            required_skill,
            ..report.clone()
        },
    )
}

pub fn validate_volunteer_registration(
    registration: &NewVolunteer,
    limits: &ValidationLimits,
) -> TriageResult<NewVolunteer> {
    let mut errors = Vec::new();

    let name = check_text(&mut errors, "Name", &registration.name, limits.name_min, limits.name_max);
    let skills = check_text(
        &mut errors,
        "Skills",
        &registration.skills,
        limits.skills_min,
        limits.skills_max,
    );
    // Blank contact is the same as none.
    let contact = registration
        .contact
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    if let Some(c) = &contact {
        if c.chars().count() > limits.contact_max {
            errors.push(format!("Contact must not exceed {} characters", limits.contact_max));
        }
    }

    into_result(errors, NewVolunteer { name, contact, skills })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> NewCase {
        NewCase {
            title:               "  Flooded shelter  ".into(),
            description:         "Water rising in the east wing, 40 residents".into(),
            severity:            4,
            people_affected:     40,
            urgency:             5,
            available_resources: 2,
            required_skill:      "swift water rescue".into(),
        }
    }

    fn messages(err: TriageError) -> Vec<String> {
        match err {
            TriageError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_report_is_trimmed() {
        let clean = validate_case_report(&report(), &ValidationLimits::default()).unwrap();
        assert_eq!(clean.title, "Flooded shelter");
        assert_eq!(clean.severity, 4);
    }

    #[test]
    fn every_failure_is_reported() {
        let bad = NewCase {
            title:               "Hi".into(),
            description:         "".into(),
            severity:            0,
            people_affected:     -1,
            urgency:             6,
            available_resources: 2_000_000,
            required_skill:      "ab".into(),
        };
        let errs = messages(validate_case_report(&bad, &ValidationLimits::default()).unwrap_err());
        assert_eq!(errs.len(), 7, "{errs:?}");
        assert!(errs.contains(&"Title must be at least 5 characters".to_string()));
        assert!(errs.contains(&"Description is required".to_string()));
        assert!(errs.contains(&"Severity must be between 1 and 5".to_string()));
        assert!(errs.contains(&"People affected cannot be negative".to_string()));
        assert!(errs.contains(&"Available resources exceeds maximum value of 1000000".to_string()));
    }

    #[test]
    fn score_inputs_reject_out_of_domain() {
        let ok = ScoreInputs { severity: 1, people_affected: 0, urgency: 5, available_resources: 0 };
        assert!(check_score_inputs(&ok).is_ok());

        let bad = ScoreInputs { severity: 6, people_affected: -3, ..ok };
        let errs = messages(check_score_inputs(&bad).unwrap_err());
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn blank_contact_becomes_none() {
        let reg = NewVolunteer {
            name:    "Ana Ruiz".into(),
            contact: Some("   ".into()),
            skills:  "first aid, logistics".into(),
        };
        let clean = validate_volunteer_registration(&reg, &ValidationLimits::default()).unwrap();
        assert_eq!(clean.contact, None);
    }

    #[test]
    fn short_name_rejected() {
        let reg = NewVolunteer { name: "A".into(), contact: None, skills: "triage".into() };
        let errs = messages(
            validate_volunteer_registration(&reg, &ValidationLimits::default()).unwrap_err(),
        );
        assert_eq!(errs, vec!["Name must be at least 2 characters".to_string()]);
    }
}
