//! Notification sink interface and justification policy.

pub mod error;
pub mod justification;
pub mod sink;
pub mod templates;

pub use error::NotifyError;
pub use justification::JustificationPolicy;
pub use sink::{InMemorySink, NoopSink, NotificationSink};
pub use templates::{render_confirmation_message, render_request_message, RenderedMessage};
