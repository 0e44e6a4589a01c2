//! Human-readable rendering of search outcomes.

use ferry_search::error::PathError;

/// Line printed when the goal cannot be reached.
pub const NO_SOLUTION: &str = "No solution exists.";

/// Number the moves from 1: `["1. Farmer carries the goose", ...]`.
#[must_use]
pub fn render_solution(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{}. {label}", i + 1))
        .collect()
}

/// Render either the numbered solution or a single explanatory line.
///
/// An empty solution (start already at the goal) renders as no lines.
#[must_use]
pub fn render_outcome(outcome: &Result<Vec<String>, PathError>) -> Vec<String> {
    match outcome {
        Ok(labels) => render_solution(labels),
        Err(PathError::NotFound) => vec![NO_SOLUTION.to_string()],
        Err(e) => vec![format!("Search failed: {e}")],
    }
}
