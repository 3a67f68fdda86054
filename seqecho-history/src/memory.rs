//! A single recorded analysis

use chrono::{DateTime, Utc};
use seqecho_core::{PatternKind, PatternResult};
use serde::{Deserialize, Serialize};

/// One echo: the input, what was found, and what was predicted.
/// Never mutated after the store creates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// 1-based, gap-free until the next clear
    pub id: u64,
    pub sequence: Vec<f64>,
    pub predictions: Vec<f64>,
    pub pattern: PatternResult,
    pub timestamp: DateTime<Utc>,
    pub duration_ms: f64,
}

impl Memory {
    pub fn kind(&self) -> PatternKind {
        self.pattern.kind()
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// First predicted value
    pub fn next_number(&self) -> Option<f64> {
        self.predictions.first().copied()
    }
}
