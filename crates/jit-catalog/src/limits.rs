//! Option limits consumed by `verifyUserCanRequest`/`verifyUserCanApprove`
//! (spec §4.4, §6 configuration).

use chrono::Duration;

/// Minimum activation duration, regardless of configuration (spec §3, §8).
pub fn min_activation_duration() -> Duration {
    Duration::minutes(5)
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogLimits {
    pub max_activation_duration: Duration,
    pub max_roles_per_request: usize,
    pub min_reviewers: usize,
    pub max_reviewers: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_activation_duration: Duration::minutes(120),
            max_roles_per_request: 10,
            min_reviewers: 1,
            max_reviewers: 10,
        }
    }
}
