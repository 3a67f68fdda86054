//! SeqEcho History
//!
//! In-memory record of every analysis ("echo"), running performance metrics,
//! and read-only statistics derived from both.

mod memory;
mod store;
mod metrics;
mod statistics;
mod snapshot;

pub use memory::Memory;
pub use store::HistoryStore;
pub use metrics::PerformanceMetrics;
pub use statistics::{Statistics, summarize};
pub use snapshot::{HistorySnapshot, SNAPSHOT_VERSION};
