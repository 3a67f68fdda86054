//! Export and import of the full history

use crate::{HistoryStore, Memory, PerformanceMetrics};
use chrono::{DateTime, Utc};
use seqecho_core::EchoError;
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Every memory plus the lifetime metrics, as one serializable value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub memories: Vec<Memory>,
    pub metrics: PerformanceMetrics,
}

impl HistorySnapshot {
    pub fn capture(store: &HistoryStore, metrics: &PerformanceMetrics) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            memories: store.all(),
            metrics: metrics.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, EchoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, EchoError> {
        let snapshot: Self = serde_json::from_str(text)?;
        Ok(snapshot)
    }

    /// Replace `store` and `metrics` with this snapshot's contents.
    /// Neither is modified if the snapshot is rejected.
    pub fn restore_into(self, store: &mut HistoryStore, metrics: &mut PerformanceMetrics) -> Result<(), EchoError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(EchoError::invalid_snapshot(format!(
                "unsupported version {} (expected {})",
                self.version, SNAPSHOT_VERSION
            )));
        }
        store.restore(self.memories)?;
        *metrics = self.metrics;
        Ok(())
    }
}
