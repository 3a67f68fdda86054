//! Running performance aggregates

use seqecho_core::PatternKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifetime aggregates over every analysis attempt.
///
/// Successful analyses feed the count, the running average duration, and the
/// longest sequence seen. Failed attempts only bump the `unknown` bucket.
/// Clearing the history does not reset these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_predictions: u64,
    pub average_duration_ms: f64,
    pub max_sequence_length: usize,
    pub pattern_counts: BTreeMap<PatternKind, u64>,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            total_predictions: 0,
            average_duration_ms: 0.0,
            max_sequence_length: 0,
            pattern_counts: PatternKind::ALL.iter().map(|k| (*k, 0)).collect(),
        }
    }

    /// Account for an analysis that produced a memory
    pub fn record_success(&mut self, kind: PatternKind, sequence_len: usize, duration_ms: f64) {
        self.total_predictions += 1;
        // incremental mean, no re-summing
        let delta = duration_ms - self.average_duration_ms;
        self.average_duration_ms += delta / self.total_predictions as f64;
        self.max_sequence_length = self.max_sequence_length.max(sequence_len);
        *self.pattern_counts.entry(kind).or_insert(0) += 1;
    }

    /// Account for an attempt that could not be classified
    pub fn record_failure(&mut self) {
        *self.pattern_counts.entry(PatternKind::Unknown).or_insert(0) += 1;
    }

    pub fn count(&self, kind: PatternKind) -> u64 {
        self.pattern_counts.get(&kind).copied().unwrap_or(0)
    }
}
