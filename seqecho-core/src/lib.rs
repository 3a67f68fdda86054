//! SeqEcho Core - Fundamental types
//!
//! This crate provides the core types used throughout SeqEcho:
//! - `PatternResult`: The outcome of classifying a sequence
//! - `PatternKind`: Fieldless pattern tag used for counting
//! - `EchoError`: Structured errors carried as values

mod pattern;
mod error;

pub use pattern::{PatternResult, PatternKind, UnknownReason, EPSILON, MAX_POLYNOMIAL_DEGREE};
pub use error::{EchoError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{PatternResult, PatternKind, UnknownReason, EchoError, Severity, EPSILON};
    pub use crate::error::codes;
}
