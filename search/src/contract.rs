//! Search world contract traits.

use ferry_kernel::carrier::position::PositionStateV1;

/// A value that can be searched over.
///
/// Equality and ordering must cover the whole state: the visited set is a
/// `BTreeMap` keyed by the state itself, so two states that compare equal are
/// the same graph vertex.
pub trait SearchState: Clone + Ord + std::fmt::Debug {
    /// Number of entities tracked. Every move must preserve it.
    fn dimension(&self) -> usize;

    /// Bytes hashed into the state fingerprint recorded in the audit graph.
    fn identity_bytes(&self) -> Vec<u8>;
}

impl SearchState for PositionStateV1 {
    fn dimension(&self) -> usize {
        PositionStateV1::dimension(self)
    }

    fn identity_bytes(&self) -> Vec<u8> {
        PositionStateV1::identity_bytes(self)
    }
}

/// One candidate transition produced by a world, before legality filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMoveV1<S> {
    /// The destination state.
    pub state: S,
    /// Human-readable description of the move. Never used for correctness.
    pub label: String,
}

impl<S> CandidateMoveV1<S> {
    #[must_use]
    pub fn new(state: S, label: impl Into<String>) -> Self {
        Self {
            state,
            label: label.into(),
        }
    }
}

impl<S> From<(S, String)> for CandidateMoveV1<S> {
    fn from((state, label): (S, String)) -> Self {
        Self { state, label }
    }
}

/// Trait for worlds that support search.
///
/// # Contract
///
/// - `generate_moves` enumerates every state reachable in one transition,
///   before legality filtering. Its order is the tie-break between equally
///   short solutions; the engine never re-sorts candidates.
/// - Every generated state has the same dimension as its source.
/// - Both methods are pure: same input, same output, no side effects.
pub trait SearchWorldV1 {
    /// The state type this world moves between.
    type State: SearchState;

    /// Stable world identifier recorded in graph metadata.
    fn world_id(&self) -> &str;

    /// Enumerate candidate moves out of `state`.
    fn generate_moves(&self, state: &Self::State) -> Vec<CandidateMoveV1<Self::State>>;

    /// Test whether `state` satisfies the world's safety constraints.
    fn is_legal(&self, state: &Self::State) -> bool;
}

/// What the search is looking for.
pub enum GoalV1<'g, S> {
    /// An exact target state.
    State(S),
    /// Any state accepted by the predicate.
    Predicate(&'g dyn Fn(&S) -> bool),
}

impl<S: SearchState> GoalV1<'_, S> {
    /// Whether `state` satisfies this goal.
    #[must_use]
    pub fn is_satisfied(&self, state: &S) -> bool {
        match self {
            Self::State(goal) => goal == state,
            Self::Predicate(pred) => pred(state),
        }
    }

    /// The exact goal state, if this goal is one.
    #[must_use]
    pub fn as_state(&self) -> Option<&S> {
        match self {
            Self::State(goal) => Some(goal),
            Self::Predicate(_) => None,
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for GoalV1<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::State(goal) => f.debug_tuple("State").field(goal).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
