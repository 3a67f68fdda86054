//! Pattern classification results
//!
//! A classification produces exactly one `PatternResult`. Variants carry only
//! the parameters that make sense for them, so a ratio and a degree can never
//! be set at the same time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute tolerance for all floating point equality checks.
///
/// Fixed rather than adaptive: sequences of extreme magnitude can produce
/// false negatives through cancellation. Changing it changes which sequences
/// classify as which pattern.
pub const EPSILON: f64 = 1e-10;

/// Highest polynomial degree the finite-difference check will look for.
pub const MAX_POLYNOMIAL_DEGREE: usize = 5;

/// Fieldless pattern tag, used as a map key for counters and distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Arithmetic,
    Geometric,
    Polynomial,
    Unknown,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Arithmetic,
        PatternKind::Geometric,
        PatternKind::Polynomial,
        PatternKind::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Arithmetic => "arithmetic",
            PatternKind::Geometric => "geometric",
            PatternKind::Polynomial => "polynomial",
            PatternKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a sequence could not be classified
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnknownReason {
    #[error("sequence must have at least 2 elements, got {length}")]
    TooShort { length: usize },

    #[error("all elements must be valid numbers (element {index} is not finite)")]
    InvalidElement { index: usize },

    /// Finite elements whose difference does not fit in an f64
    #[error("elements {index} and {next} are too far apart to compare", next = .index + 1)]
    Overflow { index: usize },

    #[error("no arithmetic, geometric, or polynomial pattern found")]
    NoPattern,
}

impl UnknownReason {
    /// True when the input itself was malformed, as opposed to a well-formed
    /// sequence with no supported pattern.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, UnknownReason::NoPattern)
    }
}

/// Outcome of classifying a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PatternResult {
    /// Constant difference between consecutive terms
    Arithmetic { difference: f64 },

    /// Constant ratio between consecutive terms
    Geometric { ratio: f64 },

    /// Finite differences become constant at `degree`.
    /// `differences[k]` is difference level `k + 1`; the last row is constant.
    Polynomial {
        degree: usize,
        differences: Vec<Vec<f64>>,
    },

    Unknown { reason: UnknownReason },
}

impl PatternResult {
    pub fn unknown(reason: UnknownReason) -> Self {
        PatternResult::Unknown { reason }
    }

    pub fn kind(&self) -> PatternKind {
        match self {
            PatternResult::Arithmetic { .. } => PatternKind::Arithmetic,
            PatternResult::Geometric { .. } => PatternKind::Geometric,
            PatternResult::Polynomial { .. } => PatternKind::Polynomial,
            PatternResult::Unknown { .. } => PatternKind::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, PatternResult::Unknown { .. })
    }

    // ========== Safe Accessors (never panic) ==========

    pub fn difference(&self) -> Option<f64> {
        match self {
            PatternResult::Arithmetic { difference } => Some(*difference),
            _ => None,
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        match self {
            PatternResult::Geometric { ratio } => Some(*ratio),
            _ => None,
        }
    }

    pub fn degree(&self) -> Option<usize> {
        match self {
            PatternResult::Polynomial { degree, .. } => Some(*degree),
            _ => None,
        }
    }

    pub fn unknown_reason(&self) -> Option<&UnknownReason> {
        match self {
            PatternResult::Unknown { reason } => Some(reason),
            _ => None,
        }
    }

    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            PatternResult::Arithmetic { difference } => {
                format!("arithmetic progression with common difference {}", difference)
            }
            PatternResult::Geometric { ratio } => {
                format!("geometric progression with common ratio {}", ratio)
            }
            PatternResult::Polynomial { degree, .. } => {
                format!("polynomial sequence of degree {}", degree)
            }
            PatternResult::Unknown { reason } => reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tags() {
        assert_eq!(PatternResult::Arithmetic { difference: 3.0 }.kind(), PatternKind::Arithmetic);
        assert_eq!(PatternResult::Geometric { ratio: 2.0 }.kind(), PatternKind::Geometric);
        assert_eq!(
            PatternResult::unknown(UnknownReason::NoPattern).kind(),
            PatternKind::Unknown
        );
        assert_eq!(PatternKind::Polynomial.to_string(), "polynomial");
    }

    #[test]
    fn test_accessors_only_match_own_variant() {
        let p = PatternResult::Geometric { ratio: 3.0 };
        assert_eq!(p.ratio(), Some(3.0));
        assert_eq!(p.difference(), None);
        assert_eq!(p.degree(), None);
        assert!(p.unknown_reason().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let p = PatternResult::Arithmetic { difference: 3.0 };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({"type": "arithmetic", "difference": 3.0})
        );

        let u = PatternResult::unknown(UnknownReason::TooShort { length: 1 });
        assert_eq!(
            serde_json::to_value(&u).unwrap(),
            json!({"type": "unknown", "reason": {"kind": "too_short", "length": 1}})
        );
    }

    #[test]
    fn test_reason_messages_are_distinct() {
        let short = UnknownReason::TooShort { length: 0 }.to_string();
        let invalid = UnknownReason::InvalidElement { index: 2 }.to_string();
        assert!(short.contains("at least 2 elements"));
        assert!(invalid.contains("all elements must be valid numbers"));
        assert!(UnknownReason::InvalidElement { index: 2 }.is_input_error());
        assert!(UnknownReason::Overflow { index: 0 }.is_input_error());
        assert_eq!(
            UnknownReason::Overflow { index: 3 }.to_string(),
            "elements 3 and 4 are too far apart to compare"
        );
        assert!(!UnknownReason::NoPattern.is_input_error());
    }

    #[test]
    fn test_kind_as_map_key() {
        let mut counts = std::collections::BTreeMap::new();
        counts.insert(PatternKind::Geometric, 2u64);
        counts.insert(PatternKind::Unknown, 1u64);
        let value = serde_json::to_value(&counts).unwrap();
        assert_eq!(value, json!({"geometric": 2, "unknown": 1}));
        let back: std::collections::BTreeMap<PatternKind, u64> =
            serde_json::from_value(value).unwrap();
        assert_eq!(back, counts);
    }
}
