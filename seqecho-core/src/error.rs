//! Structured errors carried as values
//!
//! Bad input never crashes the engine. Every failure is an `EchoError` with a
//! machine-readable code that the HTTP layer maps to a status.

use crate::UnknownReason;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INPUT_SHAPE: &str = "INPUT_SHAPE";
    pub const INPUT_VALUE: &str = "INPUT_VALUE";
    pub const CLASSIFICATION_MISS: &str = "CLASSIFICATION_MISS";
    pub const INVALID_COUNT: &str = "INVALID_COUNT";
    pub const CONTRACT_VIOLATION: &str = "CONTRACT_VIOLATION";
    pub const INVALID_SNAPSHOT: &str = "INVALID_SNAPSHOT";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Well-formed request that could not be satisfied
    Warning,
    /// Bad input
    Error,
    /// Misuse of the API by calling code
    Fatal,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    pub severity: Severity,
}

impl EchoError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn input_shape(details: impl Into<String>) -> Self {
        Self::new(codes::INPUT_SHAPE, details)
            .with_suggestion("Provide a list of at least 2 numbers")
    }

    pub fn input_value(details: impl Into<String>) -> Self {
        Self::new(codes::INPUT_VALUE, details)
            .with_suggestion("Remove NaN, infinite, or non-numeric elements")
    }

    /// Finite input whose differences or predictions leave the f64 range
    pub fn out_of_range(details: impl Into<String>) -> Self {
        Self::new(codes::INPUT_VALUE, details)
            .with_suggestion("Use smaller magnitudes or request fewer predictions")
    }

    pub fn classification_miss(details: impl Into<String>) -> Self {
        Self::new(codes::CLASSIFICATION_MISS, details)
            .with_suggestion("Only arithmetic, geometric, and polynomial (degree <= 5) sequences are recognized")
            .with_severity(Severity::Warning)
    }

    pub fn invalid_count(count: usize, max: usize) -> Self {
        Self::new(
            codes::INVALID_COUNT,
            format!("prediction count must be between 1 and {}, got {}", max, count),
        )
    }

    pub fn contract_violation(details: impl Into<String>) -> Self {
        Self::new(codes::CONTRACT_VIOLATION, format!("Contract violation: {}", details.into()))
            .with_suggestion("This is a bug in the calling code")
            .with_severity(Severity::Fatal)
    }

    pub fn invalid_snapshot(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_SNAPSHOT, format!("Invalid snapshot: {}", details.into()))
    }
}

impl std::fmt::Display for EchoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for EchoError {}

impl From<UnknownReason> for EchoError {
    fn from(reason: UnknownReason) -> Self {
        let message = reason.to_string();
        match reason {
            UnknownReason::TooShort { .. } => Self::input_shape(message),
            UnknownReason::InvalidElement { .. } => Self::input_value(message),
            UnknownReason::Overflow { .. } => Self::out_of_range(message),
            UnknownReason::NoPattern => Self::classification_miss(message),
        }
    }
}

impl From<serde_json::Error> for EchoError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_snapshot(err.to_string())
    }
}
