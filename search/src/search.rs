//! Search entry point and expansion loop.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, debug_span, trace};

use crate::contract::{CandidateMoveV1, GoalV1, SearchState, SearchWorldV1};
use crate::error::SearchError;
use crate::frontier::BreadthFirstFrontier;
use crate::graph::{
    CandidateOutcomeV1, CandidateRecordV1, DeadEndReasonV1, ExpandEventV1, PanicStageV1,
    SearchGraphMetadata, SearchGraphNodeSummaryV1, SearchGraphV1, TerminationReasonV1,
};
use crate::node::{state_fingerprint, SearchNodeV1};
use crate::policy::SearchPolicyV1;

/// Result of a search execution.
///
/// Always contains a complete `SearchGraphV1` audit trail regardless of how
/// the search terminated. Check [`SearchResult::is_goal_reached`] or inspect
/// `graph.metadata.termination_reason` to determine the outcome.
#[derive(Debug)]
pub struct SearchResult<S> {
    /// The goal node (if found).
    pub goal_node: Option<SearchNodeV1<S>>,
    /// The complete search graph audit trail.
    pub graph: SearchGraphV1,
    /// All nodes created during search, indexed by `node_id`.
    pub nodes: Vec<SearchNodeV1<S>>,
}

impl<S: SearchState> SearchResult<S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.graph.metadata.termination_reason,
            TerminationReasonV1::GoalReached { .. }
        )
    }

    /// Move labels from the initial state to the goal, if one was reached.
    #[must_use]
    pub fn solution_labels(&self) -> Option<Vec<String>> {
        let goal = self.goal_node.as_ref()?;
        Some(reconstruct_labels(&self.nodes, goal.node_id))
    }

    /// States from the initial state to the goal (both inclusive).
    #[must_use]
    pub fn solution_states(&self) -> Option<Vec<S>> {
        let goal = self.goal_node.as_ref()?;
        Some(
            reconstruct_path(&self.nodes, goal.node_id)
                .into_iter()
                .filter_map(|id| node_at(&self.nodes, id))
                .map(|n| n.state.clone())
                .collect(),
        )
    }
}

/// Run breadth-first search from `initial` towards `goal`.
///
/// Candidates are processed in the world's generation order. A candidate is
/// skipped if illegal, skipped if its state was already queued, and returned
/// as the solution the first time it satisfies the goal. Because every move
/// has unit cost and the frontier is FIFO, that first goal discovery is a
/// shortest path.
///
/// All runtime terminations (goal, exhaustion, malformed moves, caught panics,
/// budgets) return `Ok(SearchResult)` with the audit trail preserved.
///
/// # Errors
///
/// Pre-flight only:
/// - [`SearchError::InvalidPolicy`] if a budget is zero
/// - [`SearchError::DimensionMismatch`] if an exact goal has a different
///   dimension from `initial`
/// - [`SearchError::InvalidInitialState`] if `initial` fails `is_legal`
pub fn search<W: SearchWorldV1 + ?Sized>(
    world: &W,
    initial: W::State,
    goal: &GoalV1<'_, W::State>,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<W::State>, SearchError> {
    policy.validate()?;

    if let Some(goal_state) = goal.as_state() {
        if goal_state.dimension() != initial.dimension() {
            return Err(SearchError::DimensionMismatch {
                initial: initial.dimension(),
                goal: goal_state.dimension(),
            });
        }
    }

    let span = debug_span!("search", world_id = world.world_id());
    let _guard = span.enter();

    let mut run = SearchRun::new(world, goal, policy, SearchNodeV1::root(initial));

    // Fail fast on an illegal initial state (with panic protection).
    let root_legal = catch_unwind(AssertUnwindSafe(|| world.is_legal(&run.nodes[0].state)));
    match root_legal {
        Ok(true) => {}
        Ok(false) => {
            let root = &run.nodes[0];
            return Err(SearchError::InvalidInitialState {
                state: format!("{:?}", root.state),
                fingerprint: root.state_fingerprint.as_str().to_string(),
            });
        }
        Err(_) => {
            return Ok(run.finish(TerminationReasonV1::InternalPanic {
                stage: PanicStageV1::IsLegalRoot,
            }));
        }
    }

    // Check if root is already a goal (with panic protection)
    let root_is_goal = catch_unwind(AssertUnwindSafe(|| goal.is_satisfied(&run.nodes[0].state)));
    match root_is_goal {
        Ok(true) => {
            debug!("initial state satisfies goal");
            return Ok(run.finish(TerminationReasonV1::GoalReached { node_id: 0 }));
        }
        Ok(false) => {}
        Err(_) => {
            return Ok(run.finish(TerminationReasonV1::InternalPanic {
                stage: PanicStageV1::GoalPredicate,
            }));
        }
    }

    let root = run.nodes[0].clone();
    run.frontier.push(root);

    let termination_reason = run.drive();
    debug!(
        expansions = run.expansions.len(),
        visited = run.frontier.visited_count(),
        reason = ?termination_reason,
        "search terminated"
    );
    Ok(run.finish(termination_reason))
}

/// Mutable state of one search call. Dropped when the call returns.
struct SearchRun<'a, 'g, W: SearchWorldV1 + ?Sized> {
    world: &'a W,
    goal: &'a GoalV1<'g, W::State>,
    policy: &'a SearchPolicyV1,
    frontier: BreadthFirstFrontier<W::State>,
    nodes: Vec<SearchNodeV1<W::State>>,
    expansions: Vec<ExpandEventV1>,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    candidates_generated: u64,
    illegal_rejected: u64,
    duplicates_suppressed: u64,
    depth_limited: u64,
    dead_ends: u64,
}

impl<'a, 'g, W: SearchWorldV1 + ?Sized> SearchRun<'a, 'g, W> {
    fn new(
        world: &'a W,
        goal: &'a GoalV1<'g, W::State>,
        policy: &'a SearchPolicyV1,
        root: SearchNodeV1<W::State>,
    ) -> Self {
        Self {
            world,
            goal,
            policy,
            frontier: BreadthFirstFrontier::new(),
            nodes: vec![root],
            expansions: Vec::new(),
            counters: Counters::default(),
        }
    }

    /// Main loop: pop, expand, repeat until a termination reason appears.
    fn drive(&mut self) -> TerminationReasonV1 {
        loop {
            if self.frontier.is_empty() {
                return if self.counters.depth_limited > 0 {
                    TerminationReasonV1::DepthBudgetExceeded
                } else {
                    TerminationReasonV1::FrontierExhausted
                };
            }

            if self.expansions.len() as u64 >= self.policy.max_expansions {
                return TerminationReasonV1::ExpansionBudgetExceeded;
            }

            let Some(current) = self.frontier.pop() else {
                return TerminationReasonV1::FrontierExhausted;
            };

            if let Some(reason) = self.expand(&current) {
                return reason;
            }
        }
    }

    /// Expand one node and record its event. Returns a termination reason if
    /// the search must stop.
    fn expand(&mut self, current: &SearchNodeV1<W::State>) -> Option<TerminationReasonV1> {
        let world = self.world;
        let mut event = ExpandEventV1 {
            expansion_order: self.expansions.len() as u64,
            node_id: current.node_id,
            state_fingerprint: current.state_fingerprint.hex_digest().to_string(),
            depth: current.depth,
            candidates: Vec::new(),
            dead_end_reason: None,
        };

        // Generate candidates (with panic protection)
        let Ok(moves) = catch_unwind(AssertUnwindSafe(|| world.generate_moves(&current.state)))
        else {
            self.expansions.push(event);
            return Some(TerminationReasonV1::InternalPanic {
                stage: PanicStageV1::GenerateMoves,
            });
        };
        self.counters.candidates_generated += moves.len() as u64;

        let mut children = 0u64;
        let mut depth_cut = false;
        let mut termination = None;

        for (index, candidate) in moves.into_iter().enumerate() {
            let index = index as u64;
            let (outcome, stop) = self.process_candidate(current, &candidate);
            match &outcome {
                CandidateOutcomeV1::Enqueued { .. } => children += 1,
                CandidateOutcomeV1::SkippedByDepthLimit => depth_cut = true,
                _ => {}
            }
            event.candidates.push(CandidateRecordV1 {
                index,
                label: candidate.label,
                outcome,
            });
            if stop.is_some() {
                termination = stop;
                break;
            }
        }

        if termination.is_none() && children == 0 {
            let reason = if depth_cut {
                DeadEndReasonV1::DepthLimited
            } else {
                DeadEndReasonV1::Exhaustive
            };
            self.counters.dead_ends += 1;
            event.dead_end_reason = Some(reason);
        }

        trace!(
            node_id = current.node_id,
            depth = current.depth,
            candidates = event.candidates.len(),
            children,
            "expanded node"
        );
        self.expansions.push(event);
        termination
    }

    /// Decide the fate of one candidate: malformed, illegal, duplicate,
    /// depth-limited, goal, or queued.
    fn process_candidate(
        &mut self,
        current: &SearchNodeV1<W::State>,
        candidate: &CandidateMoveV1<W::State>,
    ) -> (CandidateOutcomeV1, Option<TerminationReasonV1>) {
        let world = self.world;
        let goal = self.goal;
        let expected = current.state.dimension();
        let actual = candidate.state.dimension();
        if actual != expected {
            return (
                CandidateOutcomeV1::MalformedMove { expected, actual },
                Some(TerminationReasonV1::MalformedMove {
                    node_id: current.node_id,
                    label: candidate.label.clone(),
                    expected,
                    actual,
                }),
            );
        }

        match catch_unwind(AssertUnwindSafe(|| world.is_legal(&candidate.state))) {
            Ok(true) => {}
            Ok(false) => {
                self.counters.illegal_rejected += 1;
                return (CandidateOutcomeV1::Illegal, None);
            }
            Err(_) => {
                return (
                    CandidateOutcomeV1::NotEvaluated,
                    Some(TerminationReasonV1::InternalPanic {
                        stage: PanicStageV1::IsLegalCandidate,
                    }),
                );
            }
        }

        // First-seen-wins dedup
        if let Some(existing_node) = self.frontier.visited_by(&candidate.state) {
            self.counters.duplicates_suppressed += 1;
            return (CandidateOutcomeV1::DuplicateSuppressed { existing_node }, None);
        }

        if current.depth >= self.policy.max_depth {
            self.counters.depth_limited += 1;
            return (CandidateOutcomeV1::SkippedByDepthLimit, None);
        }

        let is_goal = match catch_unwind(AssertUnwindSafe(|| goal.is_satisfied(&candidate.state))) {
            Ok(is_goal) => is_goal,
            Err(_) => {
                return (
                    CandidateOutcomeV1::NotEvaluated,
                    Some(TerminationReasonV1::InternalPanic {
                        stage: PanicStageV1::GoalPredicate,
                    }),
                );
            }
        };

        let node_id = self.nodes.len() as u64;
        let child = SearchNodeV1::child(
            node_id,
            current,
            candidate.state.clone(),
            candidate.label.clone(),
        );
        self.nodes.push(child.clone());

        if is_goal {
            self.frontier.mark_visited(&child.state, node_id);
            debug!(node_id, depth = child.depth, "goal reached");
            return (
                CandidateOutcomeV1::GoalReached { to_node: node_id },
                Some(TerminationReasonV1::GoalReached { node_id }),
            );
        }

        self.frontier.push(child);
        (CandidateOutcomeV1::Enqueued { to_node: node_id }, None)
    }

    fn finish(self, termination_reason: TerminationReasonV1) -> SearchResult<W::State> {
        let goal_node = match &termination_reason {
            TerminationReasonV1::GoalReached { node_id } => node_at(&self.nodes, *node_id).cloned(),
            _ => None,
        };

        // Root is visited even when the search stops before queueing it.
        let states_visited = self.frontier.visited_count().max(1) as u64;
        let root_fp = self.nodes[0].state_fingerprint.hex_digest().to_string();
        let goal_fp = self
            .goal
            .as_state()
            .map(|g| state_fingerprint(g).hex_digest().to_string());

        let mut expansion_order_by_node = vec![None; self.nodes.len()];
        for e in &self.expansions {
            if let Some(slot) = usize::try_from(e.node_id)
                .ok()
                .and_then(|i| expansion_order_by_node.get_mut(i))
            {
                slot.get_or_insert(e.expansion_order);
            }
        }

        let node_summaries = self
            .nodes
            .iter()
            .zip(expansion_order_by_node)
            .map(|(n, expansion_order)| SearchGraphNodeSummaryV1 {
                node_id: n.node_id,
                parent_id: n.parent_id,
                state_fingerprint: n.state_fingerprint.hex_digest().to_string(),
                state_hex: hex::encode(n.state.identity_bytes()),
                depth: n.depth,
                producing_label: n.producing_label.clone(),
                is_goal: matches!(
                    &termination_reason,
                    TerminationReasonV1::GoalReached { node_id } if *node_id == n.node_id
                ),
                expansion_order,
            })
            .collect();

        let metadata = SearchGraphMetadata {
            world_id: self.world.world_id().to_string(),
            root_state_fingerprint: root_fp,
            goal_state_fingerprint: goal_fp,
            total_expansions: self.expansions.len() as u64,
            total_candidates_generated: self.counters.candidates_generated,
            total_illegal_rejected: self.counters.illegal_rejected,
            total_duplicates_suppressed: self.counters.duplicates_suppressed,
            total_depth_limited: self.counters.depth_limited,
            total_dead_ends: self.counters.dead_ends,
            total_states_visited: states_visited,
            frontier_high_water: self.frontier.high_water(),
            termination_reason,
            max_expansions: self.policy.max_expansions,
            max_depth: self.policy.max_depth,
        };

        SearchResult {
            goal_node,
            graph: SearchGraphV1 {
                expansions: self.expansions,
                node_summaries,
                metadata,
            },
            nodes: self.nodes,
        }
    }
}

fn node_at<S>(nodes: &[SearchNodeV1<S>], node_id: u64) -> Option<&SearchNodeV1<S>> {
    usize::try_from(node_id).ok().and_then(|i| nodes.get(i))
}

/// Reconstruct the node ids from root to `goal_node_id` (both inclusive).
///
/// Walks parent back references once, then reverses. Node ids index
/// directly into `nodes`, so the walk is O(depth).
#[must_use]
pub fn reconstruct_path<S>(nodes: &[SearchNodeV1<S>], goal_node_id: u64) -> Vec<u64> {
    let mut path = Vec::new();
    let mut current_id = Some(goal_node_id);

    while let Some(id) = current_id {
        let Some(node) = node_at(nodes, id) else {
            break;
        };
        path.push(id);
        current_id = node.parent_id;
    }

    path.reverse();
    path
}

/// Reconstruct the move labels from root to `goal_node_id`.
#[must_use]
pub fn reconstruct_labels<S>(nodes: &[SearchNodeV1<S>], goal_node_id: u64) -> Vec<String> {
    reconstruct_path(nodes, goal_node_id)
        .into_iter()
        .filter_map(|id| node_at(nodes, id))
        .filter_map(|n| n.producing_label.clone())
        .collect()
}
