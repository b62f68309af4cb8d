//! Infrastructure layer: event bus and audit logger implementations.

pub mod audit;
pub mod in_memory_event_bus;

pub use audit::{AuditEventHandler, AuditLog, AuditLogStore, AuditStats};
pub use in_memory_event_bus::InMemoryEventBus;
