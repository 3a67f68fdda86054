//! Engine configuration

/// Hard ceiling on predictions per request; extrapolation error grows with
/// every step.
pub const DEFAULT_MAX_PREDICT_COUNT: usize = 10;

/// How many memories `recent_memories()` returns by default
pub const DEFAULT_MEMORIES_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct EchoConfig {
    pub max_predict_count: usize,
    pub memories_limit: usize,
    /// `None` keeps every memory
    pub history_capacity: Option<usize>,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            max_predict_count: DEFAULT_MAX_PREDICT_COUNT,
            memories_limit: DEFAULT_MEMORIES_LIMIT,
            history_capacity: None,
        }
    }
}

impl EchoConfig {
    pub fn with_max_predict_count(mut self, max: usize) -> Self {
        self.max_predict_count = max.max(1);
        self
    }

    pub fn with_memories_limit(mut self, limit: usize) -> Self {
        self.memories_limit = limit;
        self
    }

    pub fn with_history_capacity(mut self, capacity: Option<usize>) -> Self {
        self.history_capacity = capacity;
        self
    }
}
