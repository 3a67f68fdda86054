//! Extrapolation from a classified pattern

use seqecho_core::{codes, EchoError, PatternResult};

/// Compute `count` values following `list`, using the rule of `pattern`.
///
/// `pattern` must come from classifying `list`. Calling this with an
/// `Unknown` pattern is a bug in the caller and is reported as
/// `CONTRACT_VIOLATION`. Extrapolating past the f64 range is an error, never
/// an infinite prediction.
pub fn predict(list: &[f64], pattern: &PatternResult, count: usize) -> Result<Vec<f64>, EchoError> {
    let values = extrapolate(list, pattern, count)?;
    match values.iter().position(|v| !v.is_finite()) {
        Some(step) => Err(EchoError::out_of_range(format!(
            "prediction {} of {} exceeds the floating-point range",
            step + 1,
            count
        ))),
        None => Ok(values),
    }
}

fn extrapolate(list: &[f64], pattern: &PatternResult, count: usize) -> Result<Vec<f64>, EchoError> {
    if count == 0 {
        return Err(EchoError::new(codes::INVALID_COUNT, "prediction count must be at least 1"));
    }

    let last = match list.last() {
        Some(v) => *v,
        None => return Err(EchoError::input_shape("cannot extrapolate an empty sequence")),
    };

    match pattern {
        PatternResult::Arithmetic { difference } => Ok(predict_arithmetic(last, *difference, count)),
        PatternResult::Geometric { ratio } => Ok(predict_geometric(last, *ratio, count)),
        PatternResult::Polynomial { degree, differences } => {
            if differences.len() != *degree {
                return Err(EchoError::contract_violation(format!(
                    "polynomial of degree {} carries {} difference levels",
                    degree,
                    differences.len()
                )));
            }
            predict_polynomial(last, differences, count)
        }
        PatternResult::Unknown { reason } => Err(EchoError::contract_violation(format!(
            "predict() called on an unknown pattern ({})",
            reason
        ))),
    }
}

fn predict_arithmetic(last: f64, diff: f64, count: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(count);
    let mut current = last;
    for _ in 0..count {
        current += diff;
        result.push(current);
    }
    result
}

fn predict_geometric(last: f64, ratio: f64, count: usize) -> Vec<f64> {
    let mut result = Vec::with_capacity(count);
    let mut current = last;
    for _ in 0..count {
        current *= ratio;
        result.push(current);
    }
    result
}

/// Newton forward-difference extrapolation.
///
/// Only the last entry of each row matters for the next step, so the table is
/// carried as its right edge: `edge[0]` is the last sequence value and
/// `edge[k]` the last value of difference level `k`. The bottom level is
/// constant; each step walks back up, adding the newly appended value of a
/// level to the last value of the level above.
fn predict_polynomial(last: f64, differences: &[Vec<f64>], count: usize) -> Result<Vec<f64>, EchoError> {
    let mut edge = Vec::with_capacity(differences.len() + 1);
    edge.push(last);
    for row in differences {
        match row.last() {
            Some(v) => edge.push(*v),
            None => return Err(EchoError::contract_violation("empty finite-difference row")),
        }
    }

    let mut result = Vec::with_capacity(count);
    for _ in 0..count {
        for level in (0..edge.len() - 1).rev() {
            edge[level] += edge[level + 1];
        }
        result.push(edge[0]);
    }
    Ok(result)
}
