//! ImpactBridge triage core.
//!
//! Records crisis cases and volunteers in SQLite, scores each case with a
//! fixed weighted formula, and lists cases most-urgent first.
//!
//! ```no_run
//! use impactbridge_core::{case_store::{CaseStore, NewCase}, store::TriageStore};
//!
//! let store = TriageStore::open_migrated("impactbridge.db")?;
//! let cases = CaseStore::new(&store);
//! let case = cases.create(NewCase {
//!     title:               "Bridge collapse".into(),
//!     description:         "Main road bridge down, village cut off".into(),
//!     severity:            5,
//!     people_affected:     300,
//!     urgency:             5,
//!     available_resources: 10,
//!     required_skill:      "structural engineering".into(),
//! })?;
//! assert_eq!(case.priority_score, 15 + 600 + 20 - 20);
//! # Ok::<(), impactbridge_core::error::TriageError>(())
//! ```

pub mod case_store;
pub mod clock;
pub mod config;
pub mod error;
pub mod scoring;
pub mod store;
pub mod types;
pub mod validation;
pub mod volunteer_store;
