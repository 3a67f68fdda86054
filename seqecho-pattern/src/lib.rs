//! SeqEcho Pattern Engine
//!
//! Classification of numeric sequences into arithmetic, geometric, or
//! polynomial patterns, and extrapolation of the next values.
//! Everything here is a pure function of its inputs.

mod classifier;
mod predictor;
mod formula;

pub use classifier::{
    classify, validate_sequence,
    check_arithmetic, check_geometric, check_polynomial,
    is_arithmetic, is_geometric, difference_table,
};
pub use predictor::predict;
pub use formula::{nth_term_formula, polynomial_coefficients};
