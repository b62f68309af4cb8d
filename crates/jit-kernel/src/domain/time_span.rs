//! `TimeSpan` value object (spec §3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("time span end ({end}) precedes start ({start})")]
pub struct InvalidTimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open-in-spirit validity window: `start <= now <= end` counts as
/// valid (spec uses an inclusive end for `isValid`; provisioned IAM
/// conditions use a half-open `< end` comparison instead — see
/// `jit-condition` for the CEL rendering of the window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSpan {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidTimeSpan> {
        if start > end {
            return Err(InvalidTimeSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn from_duration(
        start: DateTime<Utc>,
        duration: chrono::Duration,
    ) -> Result<Self, InvalidTimeSpan> {
        Self::new(start, start + duration)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now <= self.end
    }
}
