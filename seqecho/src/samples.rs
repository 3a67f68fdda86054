//! Example sequences with known outcomes

use seqecho_core::PatternKind;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub name: &'static str,
    pub description: &'static str,
    pub sequence: &'static [f64],
    pub expected_pattern: PatternKind,
    /// `None` when no pattern is expected
    pub expected_next: Option<f64>,
}

static SAMPLES: [Sample; 12] = [
    Sample {
        name: "counting_by_threes",
        description: "Arithmetic, common difference 3",
        sequence: &[3.0, 6.0, 9.0, 12.0],
        expected_pattern: PatternKind::Arithmetic,
        expected_next: Some(15.0),
    },
    Sample {
        name: "countdown",
        description: "Arithmetic, common difference -5",
        sequence: &[20.0, 15.0, 10.0, 5.0],
        expected_pattern: PatternKind::Arithmetic,
        expected_next: Some(0.0),
    },
    Sample {
        name: "constant",
        description: "Constant sequence (arithmetic with difference 0)",
        sequence: &[7.0, 7.0, 7.0, 7.0],
        expected_pattern: PatternKind::Arithmetic,
        expected_next: Some(7.0),
    },
    Sample {
        name: "powers_of_two",
        description: "Geometric, common ratio 2",
        sequence: &[1.0, 2.0, 4.0, 8.0, 16.0],
        expected_pattern: PatternKind::Geometric,
        expected_next: Some(32.0),
    },
    Sample {
        name: "tripling",
        description: "Geometric, common ratio 3",
        sequence: &[2.0, 6.0, 18.0, 54.0],
        expected_pattern: PatternKind::Geometric,
        expected_next: Some(162.0),
    },
    Sample {
        name: "halving",
        description: "Geometric, common ratio 0.5",
        sequence: &[64.0, 32.0, 16.0, 8.0],
        expected_pattern: PatternKind::Geometric,
        expected_next: Some(4.0),
    },
    Sample {
        name: "alternating",
        description: "Geometric, common ratio -3",
        sequence: &[1.0, -3.0, 9.0, -27.0],
        expected_pattern: PatternKind::Geometric,
        expected_next: Some(81.0),
    },
    Sample {
        name: "squares",
        description: "Polynomial of degree 2 (n^2)",
        sequence: &[1.0, 4.0, 9.0, 16.0, 25.0],
        expected_pattern: PatternKind::Polynomial,
        expected_next: Some(36.0),
    },
    Sample {
        name: "cubes",
        description: "Polynomial of degree 3 (n^3)",
        sequence: &[1.0, 8.0, 27.0, 64.0, 125.0],
        expected_pattern: PatternKind::Polynomial,
        expected_next: Some(216.0),
    },
    Sample {
        name: "triangular",
        description: "Triangular numbers, polynomial of degree 2",
        sequence: &[1.0, 3.0, 6.0, 10.0, 15.0],
        expected_pattern: PatternKind::Polynomial,
        expected_next: Some(21.0),
    },
    Sample {
        name: "fibonacci",
        description: "Recurrence, not a supported pattern",
        sequence: &[1.0, 1.0, 2.0, 3.0, 5.0, 8.0],
        expected_pattern: PatternKind::Unknown,
        expected_next: None,
    },
    Sample {
        name: "primes",
        description: "Primes, not a supported pattern",
        sequence: &[2.0, 3.0, 5.0, 7.0, 11.0, 13.0],
        expected_pattern: PatternKind::Unknown,
        expected_next: None,
    },
];

pub fn samples() -> &'static [Sample] {
    &SAMPLES
}
