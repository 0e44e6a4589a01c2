//! `ExplicitGraphWorld`: a search world backed by an adjacency list.
//!
//! Every transition is listed up front. Used to check the engine against
//! independent graph algorithms on synthetic instances, where the whole
//! state space is known.

use std::collections::{BTreeMap, BTreeSet};

use ferry_kernel::carrier::position::PositionStateV1;
use ferry_search::contract::{CandidateMoveV1, SearchWorldV1};

use crate::contract::PuzzleWorldV1;

/// Directed graph over [`PositionStateV1`] with a set of forbidden states.
///
/// Outgoing edges of a state are offered in insertion order. Forbidden
/// states fail `is_legal`; edges into them are still generated, so the
/// engine has to filter them.
#[derive(Debug, Clone)]
pub struct ExplicitGraphWorld {
    world_id: String,
    initial: PositionStateV1,
    goal: PositionStateV1,
    edges: BTreeMap<PositionStateV1, Vec<(PositionStateV1, String)>>,
    forbidden: BTreeSet<PositionStateV1>,
}

impl ExplicitGraphWorld {
    #[must_use]
    pub fn new(
        world_id: impl Into<String>,
        initial: PositionStateV1,
        goal: PositionStateV1,
    ) -> Self {
        Self {
            world_id: world_id.into(),
            initial,
            goal,
            edges: BTreeMap::new(),
            forbidden: BTreeSet::new(),
        }
    }

    /// Append a directed edge. Parallel edges are kept.
    pub fn add_edge(
        &mut self,
        from: PositionStateV1,
        to: PositionStateV1,
        label: impl Into<String>,
    ) {
        self.edges.entry(from).or_default().push((to, label.into()));
    }

    /// Mark `state` as failing the legality predicate.
    pub fn forbid(&mut self, state: PositionStateV1) {
        self.forbidden.insert(state);
    }

    #[must_use]
    pub fn is_forbidden(&self, state: &PositionStateV1) -> bool {
        self.forbidden.contains(state)
    }

    /// Outgoing edges of `state`, in insertion order.
    #[must_use]
    pub fn successors(&self, state: &PositionStateV1) -> &[(PositionStateV1, String)] {
        self.edges.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every state that appears as an endpoint, plus the initial and goal.
    #[must_use]
    pub fn states(&self) -> BTreeSet<PositionStateV1> {
        let mut out = BTreeSet::new();
        out.insert(self.initial.clone());
        out.insert(self.goal.clone());
        for (from, tos) in &self.edges {
            out.insert(from.clone());
            out.extend(tos.iter().map(|(to, _)| to.clone()));
        }
        out
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

impl SearchWorldV1 for ExplicitGraphWorld {
    type State = PositionStateV1;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn generate_moves(&self, state: &PositionStateV1) -> Vec<CandidateMoveV1<PositionStateV1>> {
        self.successors(state)
            .iter()
            .map(|(to, label)| CandidateMoveV1::new(to.clone(), label.clone()))
            .collect()
    }

    fn is_legal(&self, state: &PositionStateV1) -> bool {
        !self.is_forbidden(state)
    }
}

impl PuzzleWorldV1 for ExplicitGraphWorld {
    fn initial_state(&self) -> PositionStateV1 {
        self.initial.clone()
    }

    fn goal_state(&self) -> PositionStateV1 {
        self.goal.clone()
    }
}
