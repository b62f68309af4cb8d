//! Domain events published on every state transition (spec §1, C10).
//!
//! Grounded on the teacher's generic `EventHandler<E>`/`AuditEventHandler`
//! pair: any event type implementing [`jit_kernel::DomainEvent`] is
//! captured verbatim by the audit logger, so this enum needs no special
//! handling wired in anywhere else.

use chrono::{DateTime, Utc};
use jit_kernel::DomainEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActivatorEvent {
    RequestCreated {
        activation_id: String,
        beneficiary: String,
        project_role: String,
    },
    TokenIssued {
        activation_id: String,
        reviewers: Vec<String>,
    },
    RequestApproved {
        activation_id: String,
        approver: String,
    },
    RequestRejected {
        activation_id: String,
        reason: String,
    },
    BindingProvisioned {
        activation_id: String,
        project_role: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DomainEvent for ActivatorEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ActivatorEvent::RequestCreated { .. } => "activation.request_created",
            ActivatorEvent::TokenIssued { .. } => "activation.token_issued",
            ActivatorEvent::RequestApproved { .. } => "activation.request_approved",
            ActivatorEvent::RequestRejected { .. } => "activation.request_rejected",
            ActivatorEvent::BindingProvisioned { .. } => "activation.binding_provisioned",
        }
    }

    fn aggregate_id(&self) -> Option<String> {
        match self {
            ActivatorEvent::RequestCreated { activation_id, .. }
            | ActivatorEvent::TokenIssued { activation_id, .. }
            | ActivatorEvent::RequestApproved { activation_id, .. }
            | ActivatorEvent::RequestRejected { activation_id, .. }
            | ActivatorEvent::BindingProvisioned { activation_id, .. } => {
                Some(activation_id.clone())
            }
        }
    }
}
