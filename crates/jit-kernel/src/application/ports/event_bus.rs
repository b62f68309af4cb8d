//! Event bus port (C10 plumbing).
//!
//! Every state transition in the activator and provisioner is published as
//! a `DomainEvent`. The audit logger subscribes a catch-all `EventHandler`
//! that never filters, so every transition is recorded (spec §8: audit
//! invariants). The bus itself is generic over event types rather than a
//! single sum type, mirroring how a real deployment would let independent
//! bounded contexts define their own event payloads without a shared enum.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

/// Marker trait for anything that can travel through the event bus.
pub trait DomainEvent:
    Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Stable, dotted event type name (e.g. `"activation.request_created"`).
    fn event_type(&self) -> &'static str;

    /// Aggregate this event belongs to, if any (used for audit correlation).
    fn aggregate_id(&self) -> Option<String> {
        None
    }
}

/// Envelope wrapping a `DomainEvent` with delivery metadata.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct EventEnvelope<E> {
    pub event_id: Uuid,
    pub event: E,
    pub occurred_at: chrono::DateTime<chrono::Utc>,
    pub correlation_id: Option<String>,
    pub causation_id: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(event: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event,
            occurred_at: chrono::Utc::now(),
            correlation_id: None,
            causation_id: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// A handler subscribed to one event type on the bus.
#[async_trait]
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Stable handler name, used in subscription bookkeeping and logs.
    fn name(&self) -> &'static str;

    async fn handle(&self, envelope: EventEnvelope<E>) -> anyhow::Result<()>;

    /// Whether this handler wants to process a given envelope. Defaults to
    /// "handle everything" — the audit logger relies on this default.
    fn should_handle(&self, _envelope: &EventEnvelope<E>) -> bool {
        true
    }
}

/// A live subscription, cancellable independently of the bus.
pub trait Subscription: Send + Sync {
    fn id(&self) -> &str;
    fn event_type(&self) -> &'static str;
    fn handler_name(&self) -> &'static str;
    fn cancel(&self);
    fn is_active(&self) -> bool;
}

/// Publish side of the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish<E: DomainEvent>(&self, event: E) -> anyhow::Result<()>;
    async fn publish_with_envelope<E: DomainEvent>(
        &self,
        envelope: EventEnvelope<E>,
    ) -> anyhow::Result<()>;
}

/// Subscribe side of the bus.
///
/// Generic over the event type, so this trait is consumed as a concrete
/// type (`InMemoryEventBus`) rather than `dyn EventBus` — mirrors the
/// teacher's own event bus contract.
#[async_trait]
pub trait EventBus: EventPublisher {
    async fn subscribe<E, H>(&self, handler: Arc<H>) -> anyhow::Result<Arc<dyn Subscription>>
    where
        E: DomainEvent,
        H: EventHandler<E> + 'static;

    fn subscription_count(&self) -> usize;
    fn handler_count(&self) -> usize;
}
