//! Plain-text rendering for the two messages the activator sends (spec C8).

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

/// Sent to each reviewer when an MPA request is created.
pub fn render_request_message(
    beneficiary: &str,
    role: &str,
    justification: &str,
    expires_at: DateTime<Utc>,
    approval_url: &str,
) -> RenderedMessage {
    RenderedMessage {
        subject: format!("Access request from {beneficiary}"),
        body: format!(
            "{beneficiary} is requesting {role}.\n\
             Justification: {justification}\n\
             This request expires at {expires_at}.\n\
             Review it here: {approval_url}"
        ),
    }
}

/// Sent to the beneficiary once an activation (self or MPA) has completed.
pub fn render_confirmation_message(
    role: &str,
    approver: &str,
    end_time: DateTime<Utc>,
) -> RenderedMessage {
    RenderedMessage {
        subject: format!("Access granted: {role}"),
        body: format!(
            "Your access to {role} was approved by {approver}.\n\
             It remains active until {end_time}."
        ),
    }
}
