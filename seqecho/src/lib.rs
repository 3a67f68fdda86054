//! SeqEcho - Numeric sequence pattern detection
//!
//! Classifies a sequence as arithmetic, geometric, or polynomial, predicts
//! the values that follow, and remembers every analysis.

mod config;
mod samples;

pub use config::{EchoConfig, DEFAULT_MAX_PREDICT_COUNT, DEFAULT_MEMORIES_LIMIT};
pub use samples::{samples, Sample};

pub use seqecho_core::{codes, EchoError, PatternKind, PatternResult, Severity, UnknownReason};
pub use seqecho_history::{HistorySnapshot, Memory, PerformanceMetrics, Statistics};

use seqecho_history::{summarize, HistoryStore};
use seqecho_pattern::{classify, nth_term_formula, predict};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Result of a successful analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub predictions: Vec<f64>,
    pub next_number: f64,
    pub pattern: PatternResult,
    pub formula: Option<String>,
    pub sequence_length: usize,
    pub memory: Memory,
}

/// Classification without prediction or history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub valid: bool,
    /// Set when the sequence itself is malformed rather than merely unmatched
    pub input_error: bool,
    pub pattern: PatternResult,
    pub formula: Option<String>,
    pub message: String,
}

/// Main SeqEcho engine
///
/// Owns the history and the metrics. Construct one per process (or per test)
/// and pass it to whatever serves requests.
#[derive(Debug, Clone)]
pub struct SeqEcho {
    config: EchoConfig,
    history: HistoryStore,
    metrics: PerformanceMetrics,
}

impl SeqEcho {
    pub fn new() -> Self {
        Self::with_config(EchoConfig::default())
    }

    pub fn with_config(config: EchoConfig) -> Self {
        let history = match config.history_capacity {
            Some(cap) => HistoryStore::with_capacity_limit(cap),
            None => HistoryStore::new(),
        };
        Self {
            config,
            history,
            metrics: PerformanceMetrics::new(),
        }
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Pure classification; touches no state
    pub fn classify(&self, sequence: &[f64]) -> PatternResult {
        classify(sequence)
    }

    pub fn validate(&self, sequence: &[f64]) -> Validation {
        let pattern = self.classify(sequence);
        let formula = nth_term_formula(sequence, &pattern);
        Validation {
            valid: !pattern.is_unknown(),
            input_error: pattern.unknown_reason().is_some_and(UnknownReason::is_input_error),
            message: pattern.describe(),
            formula,
            pattern,
        }
    }

    /// Classify, predict `count` values (default 1), and record the result.
    ///
    /// Every attempt updates the metrics; only successful ones are recorded
    /// in the history, so every stored prediction is finite.
    pub fn analyze(&mut self, sequence: &[f64], count: Option<usize>) -> Result<Analysis, EchoError> {
        let count = count.unwrap_or(1);
        if count == 0 || count > self.config.max_predict_count {
            return Err(EchoError::invalid_count(count, self.config.max_predict_count));
        }

        let started = Instant::now();
        let pattern = self.classify(sequence);
        if let PatternResult::Unknown { reason } = &pattern {
            self.metrics.record_failure();
            debug!(length = sequence.len(), %reason, "sequence not classified");
            return Err(reason.clone().into());
        }

        let predictions = match predict(sequence, &pattern, count) {
            Ok(values) => values,
            Err(err) => {
                self.metrics.record_failure();
                debug!(code = %err.code, "prediction failed");
                return Err(err);
            }
        };
        let next_number = match predictions.first() {
            Some(v) => *v,
            None => return Err(EchoError::contract_violation("predictor returned no values")),
        };
        let formula = nth_term_formula(sequence, &pattern);
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        self.metrics.record_success(pattern.kind(), sequence.len(), duration_ms);
        let memory = self.history.record(sequence, pattern.clone(), predictions.clone(), duration_ms);
        debug!(id = memory.id, pattern = %pattern.kind(), count, duration_ms, "analysis recorded");

        Ok(Analysis {
            predictions,
            next_number,
            pattern,
            formula,
            sequence_length: sequence.len(),
            memory,
        })
    }

    /// Every memory, oldest first
    pub fn memories(&self) -> Vec<Memory> {
        self.history.all()
    }

    /// The most recent `memories_limit` memories, oldest first
    pub fn recent_memories(&self) -> Vec<Memory> {
        self.history.recent(self.config.memories_limit)
    }

    pub fn memory_count(&self) -> usize {
        self.history.len()
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn statistics(&self) -> Statistics {
        summarize(&self.history, &self.metrics)
    }

    /// Forget every memory. Metrics are lifetime aggregates and survive.
    pub fn clear(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        info!(dropped, "history cleared");
    }

    pub fn export(&self) -> HistorySnapshot {
        HistorySnapshot::capture(&self.history, &self.metrics)
    }

    /// Replace history and metrics with a snapshot. Nothing changes on error.
    pub fn import(&mut self, snapshot: HistorySnapshot) -> Result<(), EchoError> {
        let count = snapshot.memories.len();
        snapshot.restore_into(&mut self.history, &mut self.metrics)?;
        info!(count, "history imported");
        Ok(())
    }
}

impl Default for SeqEcho {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_scenario() {
        let mut echo = SeqEcho::new();
        let analysis = echo.analyze(&[3.0, 6.0, 9.0, 12.0], Some(1)).unwrap();
        assert_eq!(analysis.predictions, vec![15.0]);
        assert_eq!(analysis.next_number, 15.0);
        assert_eq!(analysis.pattern, PatternResult::Arithmetic { difference: 3.0 });
        assert_eq!(analysis.sequence_length, 4);
        assert_eq!(analysis.formula.as_deref(), Some("3 + 3*(n-1)"));
        assert_eq!(analysis.memory.id, 1);
    }

    #[test]
    fn test_geometric_scenario() {
        let mut echo = SeqEcho::new();
        let analysis = echo.analyze(&[2.0, 6.0, 18.0, 54.0], None).unwrap();
        assert_eq!(analysis.predictions, vec![162.0]);
        assert_eq!(analysis.pattern.ratio(), Some(3.0));
    }

    #[test]
    fn test_polynomial_two_predictions() {
        let mut echo = SeqEcho::new();
        let analysis = echo.analyze(&[1.0, 4.0, 9.0, 16.0, 25.0], Some(2)).unwrap();
        assert_eq!(analysis.predictions, vec![36.0, 49.0]);
        assert_eq!(analysis.pattern.degree(), Some(2));
    }

    #[test]
    fn test_count_bounds() {
        let mut echo = SeqEcho::new();
        let err = echo.analyze(&[1.0, 2.0], Some(0)).unwrap_err();
        assert!(err.is(codes::INVALID_COUNT));
        let err = echo.analyze(&[1.0, 2.0], Some(11)).unwrap_err();
        assert!(err.is(codes::INVALID_COUNT));
        assert_eq!(echo.analyze(&[1.0, 2.0], Some(10)).unwrap().predictions.len(), 10);
    }

    #[test]
    fn test_configured_count_cap() {
        let mut echo = SeqEcho::with_config(EchoConfig::default().with_max_predict_count(3));
        assert!(echo.analyze(&[1.0, 2.0], Some(4)).is_err());
        assert!(echo.analyze(&[1.0, 2.0], Some(3)).is_ok());
    }

    #[test]
    fn test_failures_are_distinct_and_counted() {
        let mut echo = SeqEcho::new();
        assert!(echo.analyze(&[1.0], None).unwrap_err().is(codes::INPUT_SHAPE));
        assert!(echo.analyze(&[1.0, f64::NAN], None).unwrap_err().is(codes::INPUT_VALUE));
        assert!(echo
            .analyze(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0], None)
            .unwrap_err()
            .is(codes::CLASSIFICATION_MISS));

        assert_eq!(echo.memory_count(), 0);
        assert_eq!(echo.metrics().count(PatternKind::Unknown), 3);
        assert_eq!(echo.metrics().total_predictions, 0);
    }

    #[test]
    fn test_validate_has_no_side_effects() {
        let echo = SeqEcho::new();
        let validation = echo.validate(&[1.0, 8.0, 27.0, 64.0, 125.0]);
        assert!(validation.valid);
        assert_eq!(validation.pattern.degree(), Some(3));
        assert_eq!(validation.formula.as_deref(), Some("n^3"));

        let validation = echo.validate(&[1.0]);
        assert!(!validation.valid);
        assert!(validation.input_error);
        assert!(validation.message.contains("at least 2 elements"));

        let validation = echo.validate(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
        assert!(!validation.valid);
        assert!(!validation.input_error);

        assert!(echo.validate(&[1e308, -1e308]).input_error);
        assert!(!echo.validate(&[2.0, 4.0]).input_error);

        assert_eq!(echo.memory_count(), 0);
        assert_eq!(echo.metrics(), &PerformanceMetrics::new());
    }

    #[test]
    fn test_clear_then_record_restarts_ids() {
        let mut echo = SeqEcho::new();
        for _ in 0..4 {
            echo.analyze(&[1.0, 2.0, 3.0], None).unwrap();
        }
        echo.clear();
        assert_eq!(echo.memory_count(), 0);
        let analysis = echo.analyze(&[5.0, 10.0, 20.0], None).unwrap();
        assert_eq!(analysis.memory.id, 1);
        // lifetime metrics survive the clear
        assert_eq!(echo.metrics().total_predictions, 5);
    }

    #[test]
    fn test_statistics() {
        let mut echo = SeqEcho::new();
        let empty = echo.statistics();
        assert_eq!(empty.total_echoes, 0);
        assert!(empty.first_echo.is_none() && empty.last_echo.is_none());

        echo.analyze(&[3.0, 6.0, 9.0, 12.0], None).unwrap();
        echo.analyze(&[2.0, 6.0, 18.0, 54.0], None).unwrap();
        let _ = echo.analyze(&[1.0], None);

        let stats = echo.statistics();
        assert_eq!(stats.total_echoes, 2);
        assert_eq!(stats.average_sequence_length, 4.0);
        assert_eq!(stats.pattern_distribution.get(&PatternKind::Geometric), Some(&1));
        assert_eq!(stats.performance.count(PatternKind::Unknown), 1);
        assert_eq!(stats.performance.max_sequence_length, 4);
        assert_eq!(stats.last_echo.map(|m| m.id), Some(2));
    }

    #[test]
    fn test_recent_memories_limit() {
        let mut echo = SeqEcho::with_config(EchoConfig::default().with_memories_limit(2));
        for start in 0..5 {
            let s = start as f64;
            echo.analyze(&[s, s + 1.0], None).unwrap();
        }
        let ids: Vec<u64> = echo.recent_memories().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(echo.memories().len(), 5);
    }

    #[test]
    fn test_history_capacity() {
        let mut echo = SeqEcho::with_config(EchoConfig::default().with_history_capacity(Some(2)));
        for _ in 0..3 {
            echo.analyze(&[1.0, 2.0], None).unwrap();
        }
        assert_eq!(echo.memory_count(), 2);
        assert_eq!(echo.metrics().total_predictions, 3);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut echo = SeqEcho::new();
        echo.analyze(&[3.0, 6.0, 9.0], None).unwrap();
        echo.analyze(&[1.0, 4.0, 9.0, 16.0], Some(3)).unwrap();
        let _ = echo.analyze(&[1.0, 1.0, 2.0, 3.0, 5.0, 8.0], None);

        let json = echo.export().to_json().unwrap();
        let mut restored = SeqEcho::new();
        restored.import(HistorySnapshot::from_json(&json).unwrap()).unwrap();

        let before = echo.statistics();
        let after = restored.statistics();
        assert_eq!(after.total_echoes, before.total_echoes);
        assert_eq!(after.pattern_distribution, before.pattern_distribution);
        assert_eq!(after.performance, before.performance);
        let ids: Vec<u64> = restored.memories().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let next = restored.analyze(&[2.0, 4.0], None).unwrap();
        assert_eq!(next.memory.id, 3);
    }

    #[test]
    fn test_out_of_range_input_is_not_recorded() {
        let mut echo = SeqEcho::new();
        echo.analyze(&[3.0, 6.0, 9.0], None).unwrap();

        let err = echo.analyze(&[1e308, -1e308], None).unwrap_err();
        assert!(err.is(codes::INPUT_VALUE));
        let err = echo.analyze(&[1e308, 1.7e308], None).unwrap_err();
        assert!(err.is(codes::INPUT_VALUE));

        assert_eq!(echo.memory_count(), 1);
        assert_eq!(echo.metrics().count(PatternKind::Unknown), 2);
        assert_eq!(echo.metrics().total_predictions, 1);

        let json = echo.export().to_json().unwrap();
        let mut restored = SeqEcho::new();
        restored.import(HistorySnapshot::from_json(&json).unwrap()).unwrap();
        let sequences: Vec<Vec<f64>> = restored.memories().into_iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![vec![3.0, 6.0, 9.0]]);
    }

    #[test]
    fn test_long_sequence() {
        let mut echo = SeqEcho::new();
        let squares: Vec<f64> = (1..=10_000).map(|n| (n as f64) * (n as f64)).collect();
        let analysis = echo.analyze(&squares, Some(1)).unwrap();
        assert_eq!(analysis.next_number, 100_020_001.0);
        assert_eq!(analysis.memory.sequence.len(), 10_000);
        assert_eq!(echo.metrics().max_sequence_length, 10_000);
    }

    #[test]
    fn test_caller_input_untouched() {
        let mut echo = SeqEcho::new();
        let input = vec![1.0, 4.0, 9.0, 16.0];
        echo.analyze(&input, Some(2)).unwrap();
        assert_eq!(input, vec![1.0, 4.0, 9.0, 16.0]);
        assert_eq!(echo.memories()[0].sequence, input);
    }
}
