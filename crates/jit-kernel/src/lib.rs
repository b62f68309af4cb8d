//! Shared kernel for the JIT access manager.
//!
//! This crate holds the pieces that are truly transversal across bounded
//! contexts: typed resource identifiers (C1), the `TimeSpan` value object,
//! a `Clock` port, and the event bus / audit logger (C10) that every other
//! crate publishes state transitions to. Nothing here encodes eligibility,
//! activation, or provisioning semantics — those live in `jit-condition`,
//! `jit-activator`, and `jit-provisioner` respectively.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ports::clock::{Clock, SystemClock};
pub use application::ports::event_bus::{
    DomainEvent, EventBus, EventEnvelope, EventHandler, EventPublisher, Subscription,
};
pub use domain::ids::{
    ActivationId, ActivationIdKind, ProjectId, ProjectRole, RoleBinding, UserEmail,
    ValidationError,
};
pub use domain::time_span::TimeSpan;
pub use infrastructure::audit::{AuditEventHandler, AuditLog, AuditLogStore, AuditStats};
pub use infrastructure::in_memory_event_bus::InMemoryEventBus;
