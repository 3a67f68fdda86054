//! Pattern classification
//!
//! classify, check_arithmetic, check_geometric, check_polynomial, etc.
//!
//! Families are tried in a fixed order: arithmetic, geometric, polynomial
//! (ascending degree), then unknown. A constant sequence satisfies several
//! families at once; the order makes the answer deterministic.

use seqecho_core::{PatternResult, UnknownReason, EPSILON, MAX_POLYNOMIAL_DEGREE};

/// Classify a sequence. Pure: the same input always yields the same result.
pub fn classify(list: &[f64]) -> PatternResult {
    if let Err(reason) = validate_sequence(list) {
        return PatternResult::unknown(reason);
    }

    // 1. Arithmetic
    if let Some(difference) = check_arithmetic(list) {
        return PatternResult::Arithmetic { difference };
    }

    // 2. Geometric
    if let Some(ratio) = check_geometric(list) {
        return PatternResult::Geometric { ratio };
    }

    // 3. Polynomial
    if let Some((degree, differences)) = check_polynomial(list) {
        return PatternResult::Polynomial { degree, differences };
    }

    PatternResult::unknown(UnknownReason::NoPattern)
}

/// Fail fast on input that can never be classified.
/// Length is checked before element values, element values before the
/// differences between them.
pub fn validate_sequence(list: &[f64]) -> Result<(), UnknownReason> {
    if list.len() < 2 {
        return Err(UnknownReason::TooShort { length: list.len() });
    }
    if let Some(index) = list.iter().position(|x| !x.is_finite()) {
        return Err(UnknownReason::InvalidElement { index });
    }
    if let Some(index) = list.windows(2).position(|pair| !(pair[1] - pair[0]).is_finite()) {
        return Err(UnknownReason::Overflow { index });
    }
    Ok(())
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

fn is_constant(row: &[f64]) -> bool {
    match row.first() {
        Some(&first) => row.iter().all(|&x| approx_eq(x, first)),
        None => false,
    }
}

/// Common difference, if every adjacent difference matches the first one.
pub fn check_arithmetic(list: &[f64]) -> Option<f64> {
    if list.len() < 2 {
        return None;
    }
    let diff = list[1] - list[0];
    if !diff.is_finite() {
        return None;
    }
    for pair in list.windows(2) {
        if !approx_eq(pair[1] - pair[0], diff) {
            return None;
        }
    }
    Some(diff)
}

/// Common ratio, if every adjacent ratio matches the first one.
///
/// A zero anywhere but the last position leaves the ratio undefined.
pub fn check_geometric(list: &[f64]) -> Option<f64> {
    if list.len() < 2 {
        return None;
    }
    if list[..list.len() - 1].iter().any(|&x| x == 0.0) {
        return None;
    }
    let ratio = list[1] / list[0];
    if !ratio.is_finite() {
        return None;
    }
    for pair in list.windows(2) {
        if !approx_eq(pair[1] / pair[0], ratio) {
            return None;
        }
    }
    Some(ratio)
}

/// Finite-difference table: `table[k]` is difference level `k + 1`.
/// Stops early when a level runs out of elements.
pub fn difference_table(list: &[f64], max_level: usize) -> Vec<Vec<f64>> {
    let mut table: Vec<Vec<f64>> = Vec::new();
    let mut current = list.to_vec();
    for _ in 0..max_level {
        if current.len() < 2 {
            break;
        }
        let next: Vec<f64> = current.windows(2).map(|pair| pair[1] - pair[0]).collect();
        table.push(next.clone());
        current = next;
    }
    table
}

/// Lowest degree at which the finite differences become constant, with the
/// difference levels up to and including that degree.
///
/// A sequence of length L supports degrees up to L - 2 (the constant row
/// needs at least two entries to mean anything), capped at
/// `MAX_POLYNOMIAL_DEGREE`.
pub fn check_polynomial(list: &[f64]) -> Option<(usize, Vec<Vec<f64>>)> {
    if list.len() < 3 {
        return None;
    }
    let max_degree = (list.len() - 2).min(MAX_POLYNOMIAL_DEGREE);
    let mut table = difference_table(list, max_degree);

    let degree = table.iter().position(|row| row.len() >= 2 && is_constant(row))? + 1;
    table.truncate(degree);
    Some((degree, table))
}

pub fn is_arithmetic(list: &[f64]) -> bool {
    check_arithmetic(list).is_some()
}

pub fn is_geometric(list: &[f64]) -> bool {
    check_geometric(list).is_some()
}
