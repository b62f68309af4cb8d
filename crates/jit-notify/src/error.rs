use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{0}")]
    InvalidArgument(String),

    /// Any transport failure. Never blocks activation: the notification
    /// sink is a fire-and-forget side effect (spec §9).
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}
