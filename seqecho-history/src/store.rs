//! Append-only history of analyses

use crate::Memory;
use chrono::Utc;
use seqecho_core::{EchoError, PatternResult};
use std::collections::VecDeque;

/// In-memory log of every recorded analysis, oldest first.
///
/// Owns the id counter. Ids are strictly increasing and gap-free between
/// clears; `clear()` restarts numbering at 1, so ids are only unique within
/// the current window.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    memories: VecDeque<Memory>,
    last_id: u64,
    capacity: Option<usize>,
}

impl HistoryStore {
    /// Unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring buffer: once `capacity` entries are held, recording evicts the
    /// oldest. Ids keep increasing. A capacity of 0 is treated as 1.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            memories: VecDeque::with_capacity(capacity.max(1)),
            last_id: 0,
            capacity: Some(capacity.max(1)),
        }
    }

    /// Append a new memory and return a copy of it
    pub fn record(
        &mut self,
        sequence: &[f64],
        pattern: PatternResult,
        predictions: Vec<f64>,
        duration_ms: f64,
    ) -> Memory {
        self.last_id += 1;
        let memory = Memory {
            id: self.last_id,
            sequence: sequence.to_vec(),
            predictions,
            pattern,
            timestamp: Utc::now(),
            duration_ms,
        };

        if let Some(cap) = self.capacity {
            while self.memories.len() >= cap {
                self.memories.pop_front();
            }
        }
        self.memories.push_back(memory.clone());
        memory
    }

    /// Copy of every memory, oldest first
    pub fn all(&self) -> Vec<Memory> {
        self.memories.iter().cloned().collect()
    }

    /// Copy of the most recent `limit` memories, oldest first
    pub fn recent(&self, limit: usize) -> Vec<Memory> {
        let skip = self.memories.len().saturating_sub(limit);
        self.memories.iter().skip(skip).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.memories.iter()
    }

    pub fn first(&self) -> Option<&Memory> {
        self.memories.front()
    }

    pub fn last(&self) -> Option<&Memory> {
        self.memories.back()
    }

    pub fn len(&self) -> usize {
        self.memories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memories.is_empty()
    }

    /// Drop everything and restart numbering. Irreversible.
    pub fn clear(&mut self) {
        self.memories.clear();
        self.last_id = 0;
    }

    /// Replace the contents with previously exported memories.
    ///
    /// Ids must be positive and strictly increasing; numbering continues
    /// after the last one. The store is left untouched on error.
    pub fn restore(&mut self, memories: Vec<Memory>) -> Result<(), EchoError> {
        let mut previous = 0u64;
        for memory in &memories {
            if memory.id <= previous {
                return Err(EchoError::invalid_snapshot(format!(
                    "memory ids must be positive and strictly increasing (found {} after {})",
                    memory.id, previous
                )));
            }
            previous = memory.id;
        }

        let mut memories: VecDeque<Memory> = memories.into();
        if let Some(cap) = self.capacity {
            while memories.len() > cap {
                memories.pop_front();
            }
        }
        self.memories = memories;
        self.last_id = previous;
        Ok(())
    }
}
