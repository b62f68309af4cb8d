//! Application layer for the shared kernel.
//!
//! Contracts (ports) shared across bounded contexts: a `Clock` for
//! testable time, and the event bus used to carry domain events to the
//! audit logger.

pub mod ports;
