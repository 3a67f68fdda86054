//! Closed-form nth-term formulas (1-based n)

use seqecho_core::PatternResult;

/// Coefficients closer than this to an integer are printed as that integer.
const DISPLAY_TOLERANCE: f64 = 1e-9;

/// Formula for the nth term, or `None` for unknown patterns.
///
/// ```text
/// [3, 7, 11, 15]    → "3 + 4*(n-1)"
/// [2, 6, 18, 54]    → "2 * 3^(n-1)"
/// [1, 4, 9, 16, 25] → "n^2"
/// ```
pub fn nth_term_formula(list: &[f64], pattern: &PatternResult) -> Option<String> {
    let first = *list.first()?;
    match pattern {
        PatternResult::Arithmetic { difference } => {
            let (sign, magnitude) = if *difference < 0.0 { ("-", -difference) } else { ("+", *difference) };
            Some(format!("{} {} {}*(n-1)", format_num(first), sign, format_num(magnitude)))
        }
        PatternResult::Geometric { ratio } => {
            let ratio = if *ratio < 0.0 { format!("({})", format_num(*ratio)) } else { format_num(*ratio) };
            Some(format!("{} * {}^(n-1)", format_num(first), ratio))
        }
        PatternResult::Polynomial { differences, .. } => {
            let mut leading = vec![first];
            for row in differences {
                leading.push(*row.first()?);
            }
            Some(format_polynomial(&polynomial_coefficients(&leading)))
        }
        PatternResult::Unknown { .. } => None,
    }
}

/// Expand the Newton forward form into power-basis coefficients.
///
/// `leading[k]` is the first entry of difference level k (level 0 being the
/// sequence itself), so the nth term is `sum(leading[k] * C(n-1, k))`.
/// Returns coefficients in ascending powers of n.
pub fn polynomial_coefficients(leading: &[f64]) -> Vec<f64> {
    let mut coeffs = vec![0.0; leading.len().max(1)];
    // basis = C(n-1, k) as a polynomial in n, built incrementally
    let mut basis = vec![1.0];
    for (k, &delta) in leading.iter().enumerate() {
        if k > 0 {
            // C(n-1, k) = C(n-1, k-1) * (n - k) / k
            let k = k as f64;
            let mut next = vec![0.0; basis.len() + 1];
            for (power, &c) in basis.iter().enumerate() {
                next[power + 1] += c / k;
                next[power] -= c;
            }
            basis = next;
        }
        for (power, &c) in basis.iter().enumerate() {
            coeffs[power] += delta * c;
        }
    }
    coeffs
}

fn format_num(n: f64) -> String {
    let rounded = n.round();
    if (n - rounded).abs() < DISPLAY_TOLERANCE {
        // {:.0} keeps every digit past i64::MAX; the match drops "-0"
        match format!("{:.0}", rounded) {
            text if text == "-0" => "0".to_string(),
            text => text,
        }
    } else {
        let text = format!("{:.4}", n);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn format_polynomial(coeffs: &[f64]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (power, &c) in coeffs.iter().enumerate().rev() {
        if c.abs() < DISPLAY_TOLERANCE {
            continue;
        }
        let magnitude = c.abs();
        let body = match power {
            0 => format_num(magnitude),
            _ => {
                let var = if power == 1 { "n".to_string() } else { format!("n^{}", power) };
                if (magnitude - 1.0).abs() < DISPLAY_TOLERANCE {
                    var
                } else {
                    format!("{}{}", format_num(magnitude), var)
                }
            }
        };
        if parts.is_empty() {
            parts.push(if c < 0.0 { format!("-{}", body) } else { body });
        } else {
            parts.push(format!("{} {}", if c < 0.0 { "-" } else { "+" }, body));
        }
    }
    if parts.is_empty() {
        return "0".to_string();
    }
    parts.join(" ")
}
