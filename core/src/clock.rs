//! Clock: the single source of "now" for record timestamps.
//!
//! Stores never call `Utc::now()` directly; they read a `Clock`
//! so tests can pin timestamps.

use crate::types::Timestamp;
use chrono::Utc;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
