//! Read-only summary over the history and metrics

use crate::{HistoryStore, Memory, PerformanceMetrics};
use seqecho_core::PatternKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_echoes: usize,
    /// Full precision; see `average_sequence_length_rounded` for display
    pub average_sequence_length: f64,
    pub pattern_distribution: BTreeMap<PatternKind, usize>,
    pub performance: PerformanceMetrics,
    pub first_echo: Option<Memory>,
    pub last_echo: Option<Memory>,
}

impl Statistics {
    pub fn average_sequence_length_rounded(&self) -> f64 {
        (self.average_sequence_length * 100.0).round() / 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.total_echoes == 0
    }
}

/// Summarize the current history. An empty store is a normal state and
/// yields zeros with no first/last echo.
pub fn summarize(store: &HistoryStore, metrics: &PerformanceMetrics) -> Statistics {
    let total_echoes = store.len();

    let mut pattern_distribution = BTreeMap::new();
    let mut total_length = 0usize;
    for memory in store.iter() {
        *pattern_distribution.entry(memory.kind()).or_insert(0) += 1;
        total_length += memory.sequence_len();
    }

    let average_sequence_length = if total_echoes == 0 {
        0.0
    } else {
        total_length as f64 / total_echoes as f64
    };

    Statistics {
        total_echoes,
        average_sequence_length,
        pattern_distribution,
        performance: metrics.clone(),
        first_echo: store.first().cloned(),
        last_echo: store.last().cloned(),
    }
}
