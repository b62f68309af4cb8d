//! Activation request shapes and outcomes (spec §4.5).

use jit_condition::ActivationType;
use jit_kernel::{ActivationId, ProjectId, ProjectRole, TimeSpan, UserEmail};

/// The request object a self-approval path reconstructs entirely from its
/// inputs; an MPA path reconstructs the same shape from a signed token.
#[derive(Debug, Clone)]
pub struct ActivationRequest {
    pub id: ActivationId,
    pub beneficiary: UserEmail,
    pub project: ProjectId,
    pub project_role: ProjectRole,
    pub activation_type: ActivationType,
    pub justification: String,
    pub time_span: TimeSpan,
    pub resource_condition: Option<String>,
}

impl ActivationRequest {
    pub fn end_time(&self) -> chrono::DateTime<chrono::Utc> {
        self.time_span.end()
    }
}

/// The request plus the reviewer set an MPA token carries.
#[derive(Debug, Clone)]
pub struct MpaRequest {
    pub request: ActivationRequest,
    pub reviewers: Vec<UserEmail>,
}

/// Returned once a self-approval or MPA approval has provisioned a binding
/// (the `ACTIVATED` terminal state).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationOutcome {
    pub activation_id: ActivationId,
    pub time_span: TimeSpan,
}

/// Returned once an MPA request has been signed (the `AWAITING_APPROVAL`
/// state). `obfuscated_token` is the URL-safe string reviewers receive.
#[derive(Debug, Clone)]
pub struct IssuedMpaRequest {
    pub activation_id: ActivationId,
    pub obfuscated_token: String,
    pub time_span: TimeSpan,
}
