//! Error type shared by every store and validator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Invalid status '{0}': expected one of pending, active, completed")]
    InvalidStatus(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TriageError {
    pub fn case_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Case", id }
    }

    pub fn volunteer_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Volunteer", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type TriageResult<T> = Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_join_on_display() {
        let err = TriageError::Validation(vec!["Title is required".into(), "Urgency must be between 1 and 5".into()]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Title is required; Urgency must be between 1 and 5"
        );
    }

    #[test]
    fn not_found_names_entity() {
        let err = TriageError::case_not_found(12);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Case 12 not found");
    }
}
