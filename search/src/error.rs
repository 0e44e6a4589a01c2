//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, exhaustion, malformed moves, caught panics, budgets) are
//! expressed via [`crate::graph::TerminationReasonV1`] and always come with a
//! `SearchGraphV1` audit trail.
//!
//! `PathError` is the flattened view used by [`crate::path::find_shortest_path`],
//! where the caller wants a path or a reason and nothing else.

use crate::graph::PanicStageV1;

/// Typed failure for pre-flight search validation.
///
/// No `SearchGraphV1` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The initial state fails the world's legality predicate.
    #[error("initial state {state} fails the legality predicate ({fingerprint})")]
    InvalidInitialState { state: String, fingerprint: String },
    /// Initial and goal states track a different number of entities.
    #[error("initial state has dimension {initial} but goal has dimension {goal}")]
    DimensionMismatch { initial: usize, goal: usize },
    /// A policy budget is unusable.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

/// Outcome of a shortest-path query that did not produce a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The goal is unreachable from the initial state under the legality
    /// constraint. A normal outcome, not a fault.
    #[error("no sequence of legal moves reaches the goal")]
    NotFound,
    /// The initial state fails the legality predicate.
    #[error("initial state {state} fails the legality predicate")]
    InvalidInitialState { state: String },
    /// A move generator changed the state's dimension.
    #[error("move {label:?} produced a state of dimension {actual}, expected {expected}")]
    MalformedMove {
        label: String,
        expected: usize,
        actual: usize,
    },
    /// Initial and goal states track a different number of entities.
    #[error("initial state has dimension {initial} but goal has dimension {goal}")]
    DimensionMismatch { initial: usize, goal: usize },
    /// A budget stopped the search before it could decide reachability.
    #[error("search budget exhausted after {expansions} expansions")]
    BudgetExhausted { expansions: u64 },
    /// A world callback panicked.
    #[error("world callback panicked during {stage}")]
    WorldPanicked { stage: PanicStageV1 },
    /// A policy budget is unusable.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

impl From<SearchError> for PathError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidInitialState { state, .. } => Self::InvalidInitialState { state },
            SearchError::DimensionMismatch { initial, goal } => {
                Self::DimensionMismatch { initial, goal }
            }
            SearchError::InvalidPolicy { detail } => Self::InvalidPolicy { detail },
        }
    }
}
