use boolsimp::{Simplification, Step};
use serde::Serialize;

/// The document printed by `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub original: String,
    pub normalized: String,
    pub simplified: String,
    pub steps: Vec<Step>,
}

impl Report {
    pub fn new(original: &str, simplification: Simplification) -> Self {
        Report {
            original: original.trim().to_owned(),
            normalized: normalize_input(original),
            simplified: simplification.text(),
            steps: simplification.steps,
        }
    }
}

/// Replaces middle dots with `&` and collapses whitespace runs into single spaces.
pub fn normalize_input(input: &str) -> String {
    input
        .replace('·', "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
