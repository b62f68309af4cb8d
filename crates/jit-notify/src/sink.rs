//! Notification sink port (spec C8, interface only).

use crate::error::NotifyError;
use crate::templates::RenderedMessage;
use async_trait::async_trait;
use jit_kernel::UserEmail;
use std::sync::Mutex;
use tracing::warn;

/// Delivers rendered messages to reviewer and beneficiary addresses. A
/// concrete SMTP/Slack/Pub-Sub transport is a collaborator outside this
/// crate's scope; failures must never block activation (spec §9).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, to: &UserEmail, message: RenderedMessage) -> Result<(), NotifyError>;
}

/// Discards every message. Used where notification is genuinely optional.
#[derive(Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl NotificationSink for NoopSink {
    async fn send(&self, to: &UserEmail, _message: RenderedMessage) -> Result<(), NotifyError> {
        warn!(to = to.as_str(), "no notification sink configured, dropping message");
        Ok(())
    }
}

/// Captures every message for test assertions.
#[derive(Debug, Default)]
pub struct InMemorySink {
    sent: Mutex<Vec<(UserEmail, RenderedMessage)>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(UserEmail, RenderedMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for InMemorySink {
    async fn send(&self, to: &UserEmail, message: RenderedMessage) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((to.clone(), message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[tokio::test]
    async fn in_memory_sink_captures_sent_messages() {
        let sink = InMemorySink::new();
        let to = UserEmail::from_str("bob@example.org").unwrap();
        sink.send(
            &to,
            RenderedMessage {
                subject: "s".into(),
                body: "b".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(sink.sent().len(), 1);
    }
}
