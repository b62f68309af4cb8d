//! In-memory audit log store.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One recorded state transition.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub event_type: String,
    pub aggregate_id: Option<String>,
    pub aggregate_type: Option<String>,
    pub event_data: Value,
    pub occurred_at: DateTime<Utc>,
    pub correlation_id: Option<String>,
    pub causation_id: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Aggregate counts by event type, for a cheap `/health` style summary.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct AuditStats {
    pub total: usize,
    pub by_event_type: HashMap<String, usize>,
}

/// Append-only in-memory store of audit log entries.
#[derive(Debug, Default)]
pub struct AuditLogStore {
    entries: RwLock<Vec<AuditLog>>,
}

impl AuditLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, log: AuditLog) {
        self.entries.write().await.push(log);
    }

    pub async fn all(&self) -> Vec<AuditLog> {
        self.entries.read().await.clone()
    }

    pub async fn for_aggregate(&self, aggregate_id: &str) -> Vec<AuditLog> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|log| log.aggregate_id.as_deref() == Some(aggregate_id))
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> AuditStats {
        let entries = self.entries.read().await;
        let mut by_event_type = HashMap::new();
        for log in entries.iter() {
            *by_event_type.entry(log.event_type.clone()).or_insert(0) += 1;
        }
        AuditStats {
            total: entries.len(),
            by_event_type,
        }
    }
}
