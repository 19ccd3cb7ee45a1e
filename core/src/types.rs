//! Shared primitive types used across the core.

use chrono::{DateTime, Utc};

/// Row id of a `crisis_case` record. Assigned by SQLite, never reused.
pub type CaseId = i64;

/// Row id of a `volunteer` record.
pub type VolunteerId = i64;

/// Wall-clock instant stored on records (ISO 8601 text in the database).
pub type Timestamp = DateTime<Utc>;
