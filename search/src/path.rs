//! Shortest-path queries that return move labels only.
//!
//! [`find_shortest_path`] takes the move generator and legality predicate as
//! closures; [`shortest_path`] takes a [`SearchWorldV1`]. Both run the same
//! unbounded breadth-first search as [`crate::search::search`] and flatten
//! its termination reason into a [`PathError`].

use std::marker::PhantomData;

use crate::contract::{CandidateMoveV1, GoalV1, SearchState, SearchWorldV1};
use crate::error::PathError;
use crate::graph::TerminationReasonV1;
use crate::policy::SearchPolicyV1;
use crate::search::{search, SearchResult};

/// World identifier recorded for closure-backed searches.
pub const CLOSURE_WORLD_ID: &str = "closure";

/// Adapts a move generator closure and a legality closure to [`SearchWorldV1`].
pub struct ClosureWorld<S, G, L> {
    generate_moves: G,
    is_legal: L,
    _state: PhantomData<fn(&S)>,
}

impl<S, G, L> ClosureWorld<S, G, L>
where
    S: SearchState,
    G: Fn(&S) -> Vec<CandidateMoveV1<S>>,
    L: Fn(&S) -> bool,
{
    #[must_use]
    pub fn new(generate_moves: G, is_legal: L) -> Self {
        Self {
            generate_moves,
            is_legal,
            _state: PhantomData,
        }
    }
}

impl<S, G, L> SearchWorldV1 for ClosureWorld<S, G, L>
where
    S: SearchState,
    G: Fn(&S) -> Vec<CandidateMoveV1<S>>,
    L: Fn(&S) -> bool,
{
    type State = S;

    fn world_id(&self) -> &str {
        CLOSURE_WORLD_ID
    }

    fn generate_moves(&self, state: &S) -> Vec<CandidateMoveV1<S>> {
        (self.generate_moves)(state)
    }

    fn is_legal(&self, state: &S) -> bool {
        (self.is_legal)(state)
    }
}

/// Compute the shortest sequence of move labels from `initial` to `goal`.
///
/// `generate_moves` enumerates every one-step successor of a state together
/// with its label, before legality filtering. `is_legal` is the safety
/// predicate. Among equally short solutions, the one whose moves come first
/// in generation order wins.
///
/// Returns an empty sequence when `initial == goal`.
///
/// # Errors
///
/// - [`PathError::NotFound`] if no legal path exists
/// - [`PathError::InvalidInitialState`] if `initial` fails `is_legal`
/// - [`PathError::MalformedMove`] if a generated state changes dimension
/// - [`PathError::DimensionMismatch`] if `goal` has a different dimension
/// - [`PathError::WorldPanicked`] if a closure panics
pub fn find_shortest_path<S, G, L, I>(
    initial: S,
    goal: S,
    generate_moves: G,
    is_legal: L,
) -> Result<Vec<String>, PathError>
where
    S: SearchState,
    G: Fn(&S) -> I,
    I: IntoIterator<Item = (S, String)>,
    L: Fn(&S) -> bool,
{
    let generate = move |state: &S| -> Vec<CandidateMoveV1<S>> {
        generate_moves(state)
            .into_iter()
            .map(CandidateMoveV1::from)
            .collect()
    };
    let world = ClosureWorld::new(generate, is_legal);
    shortest_path(&world, initial, &GoalV1::State(goal))
}

/// Compute the shortest sequence of move labels through `world`.
///
/// # Errors
///
/// Same as [`find_shortest_path`].
pub fn shortest_path<W: SearchWorldV1 + ?Sized>(
    world: &W,
    initial: W::State,
    goal: &GoalV1<'_, W::State>,
) -> Result<Vec<String>, PathError> {
    let result = search(world, initial, goal, &SearchPolicyV1::unbounded())?;
    labels_or_error(&result)
}

/// Flatten a finished search into labels or a [`PathError`].
///
/// # Errors
///
/// Returns the [`PathError`] matching the search's termination reason.
pub fn labels_or_error<S: SearchState>(result: &SearchResult<S>) -> Result<Vec<String>, PathError> {
    match &result.graph.metadata.termination_reason {
        TerminationReasonV1::GoalReached { .. } => {
            result.solution_labels().ok_or(PathError::NotFound)
        }
        TerminationReasonV1::FrontierExhausted => Err(PathError::NotFound),
        TerminationReasonV1::ExpansionBudgetExceeded
        | TerminationReasonV1::DepthBudgetExceeded => Err(PathError::BudgetExhausted {
            expansions: result.graph.metadata.total_expansions,
        }),
        TerminationReasonV1::MalformedMove {
            label,
            expected,
            actual,
            ..
        } => Err(PathError::MalformedMove {
            label: label.clone(),
            expected: *expected,
            actual: *actual,
        }),
        TerminationReasonV1::InternalPanic { stage } => {
            Err(PathError::WorldPanicked { stage: *stage })
        }
    }
}
