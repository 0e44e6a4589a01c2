//! `SearchGraphV1`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries. Node summaries are a derived index for path reconstruction.

use ferry_kernel::proof::canon::{canonical_json_bytes, CanonError};
use ferry_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Domain for search graph digests.
pub const DOMAIN_SEARCH_GRAPH: HashDomain = HashDomain::SearchGraph;

/// The complete search audit trail.
#[derive(Debug, Clone)]
pub struct SearchGraphV1 {
    /// Ordered expansion events (normative decision surface).
    pub expansions: Vec<ExpandEventV1>,
    /// Derived node index sorted by `node_id` ascending.
    pub node_summaries: Vec<SearchGraphNodeSummaryV1>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + candidate-expansion event.
#[derive(Debug, Clone)]
pub struct ExpandEventV1 {
    /// Total order of frontier pops.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's state.
    pub state_fingerprint: String,
    /// Depth of the expanded node.
    pub depth: u32,
    /// Ordered candidate decision log, in generation order.
    pub candidates: Vec<CandidateRecordV1>,
    /// Dead-end reason if this expansion queued no children.
    pub dead_end_reason: Option<DeadEndReasonV1>,
}

/// A generated candidate with its outcome recorded in the graph.
#[derive(Debug, Clone)]
pub struct CandidateRecordV1 {
    /// Index in the generator's output.
    pub index: u64,
    /// The move label.
    pub label: String,
    /// What happened when this candidate was processed.
    pub outcome: CandidateOutcomeV1,
}

/// Outcome of processing a candidate during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcomeV1 {
    /// New legal state; created and queued a node.
    Enqueued { to_node: u64 },
    /// New legal state satisfying the goal; search stops here.
    GoalReached { to_node: u64 },
    /// Destination fails the legality predicate.
    Illegal,
    /// Destination already visited (first-seen-wins).
    DuplicateSuppressed { existing_node: u64 },
    /// Destination would exceed `max_depth`.
    SkippedByDepthLimit,
    /// Destination dimension differs from the source.
    MalformedMove { expected: usize, actual: usize },
    /// A callback panicked while this candidate was being checked.
    NotEvaluated,
}

/// Why an expansion produced no new nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadEndReasonV1 {
    /// Every candidate was illegal or already visited.
    Exhaustive,
    /// At least one candidate was cut by the depth budget.
    DepthLimited,
}

/// Derived node summary for path reconstruction.
#[derive(Debug, Clone)]
pub struct SearchGraphNodeSummaryV1 {
    pub node_id: u64,
    pub parent_id: Option<u64>,
    pub state_fingerprint: String,
    /// Hex of the state's identity bytes.
    pub state_hex: String,
    pub depth: u32,
    pub producing_label: Option<String>,
    pub is_goal: bool,
    pub expansion_order: Option<u64>,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct SearchGraphMetadata {
    pub world_id: String,
    pub root_state_fingerprint: String,
    /// Fingerprint of the exact goal state, or `None` for predicate goals.
    pub goal_state_fingerprint: Option<String>,

    // Counters
    pub total_expansions: u64,
    pub total_candidates_generated: u64,
    pub total_illegal_rejected: u64,
    pub total_duplicates_suppressed: u64,
    pub total_depth_limited: u64,
    pub total_dead_ends: u64,
    pub total_states_visited: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,

    // Policy echo
    pub max_expansions: u64,
    pub max_depth: u32,
}

/// Why the search terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// Search found a goal state.
    GoalReached { node_id: u64 },
    /// Frontier emptied without finding a goal; the goal is unreachable.
    FrontierExhausted,
    /// `max_expansions` budget was hit.
    ExpansionBudgetExceeded,
    /// Frontier emptied, but only because the depth budget cut candidates.
    DepthBudgetExceeded,
    /// A generated move changed the state's dimension.
    MalformedMove {
        node_id: u64,
        label: String,
        expected: usize,
        actual: usize,
    },
    /// A panic was caught in a world callback.
    InternalPanic { stage: PanicStageV1 },
}

/// Stage at which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanicStageV1 {
    /// `SearchWorldV1::is_legal()` panicked on the initial state.
    IsLegalRoot,
    /// `SearchWorldV1::generate_moves()` panicked.
    GenerateMoves,
    /// `SearchWorldV1::is_legal()` panicked on a candidate.
    IsLegalCandidate,
    /// A goal predicate panicked.
    GoalPredicate,
}

impl PanicStageV1 {
    /// Stable snake-case name used in JSON and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IsLegalRoot => "is_legal_root",
            Self::GenerateMoves => "generate_moves",
            Self::IsLegalCandidate => "is_legal_candidate",
            Self::GoalPredicate => "goal_predicate",
        }
    }
}

impl std::fmt::Display for PanicStageV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SearchGraphV1 {
    /// Number of times each state fingerprint was expanded.
    ///
    /// Every count is 1 when the visited set is working: a state can only be
    /// expanded if it was queued, and it can only be queued once.
    #[must_use]
    pub fn expansion_counts(&self) -> std::collections::BTreeMap<&str, u64> {
        let mut counts = std::collections::BTreeMap::new();
        for e in &self.expansions {
            *counts.entry(e.state_fingerprint.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Canonical JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize the graph to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_GRAPH, &bytes))
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
            "node_summaries": self
                .node_summaries
                .iter()
                .map(node_summary_to_json)
                .collect::<Vec<_>>(),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "candidates": e.candidates.iter().map(candidate_record_to_json).collect::<Vec<_>>(),
        "dead_end_reason": e.dead_end_reason.map(dead_end_reason_str),
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "state_fingerprint": e.state_fingerprint,
    })
}

fn candidate_record_to_json(r: &CandidateRecordV1) -> serde_json::Value {
    serde_json::json!({
        "index": r.index,
        "label": r.label,
        "outcome": outcome_to_json(&r.outcome),
    })
}

fn outcome_to_json(o: &CandidateOutcomeV1) -> serde_json::Value {
    match o {
        CandidateOutcomeV1::Enqueued { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "enqueued"})
        }
        CandidateOutcomeV1::GoalReached { to_node } => {
            serde_json::json!({"to_node": to_node, "type": "goal_reached"})
        }
        CandidateOutcomeV1::Illegal => serde_json::json!({"type": "illegal"}),
        CandidateOutcomeV1::DuplicateSuppressed { existing_node } => {
            serde_json::json!({"existing_node": existing_node, "type": "duplicate_suppressed"})
        }
        CandidateOutcomeV1::SkippedByDepthLimit => {
            serde_json::json!({"type": "skipped_by_depth_limit"})
        }
        CandidateOutcomeV1::MalformedMove { expected, actual } => {
            serde_json::json!({"actual": actual, "expected": expected, "type": "malformed_move"})
        }
        CandidateOutcomeV1::NotEvaluated => serde_json::json!({"type": "not_evaluated"}),
    }
}

fn dead_end_reason_str(r: DeadEndReasonV1) -> &'static str {
    match r {
        DeadEndReasonV1::Exhaustive => "exhaustive",
        DeadEndReasonV1::DepthLimited => "depth_limited",
    }
}

fn node_summary_to_json(n: &SearchGraphNodeSummaryV1) -> serde_json::Value {
    serde_json::json!({
        "depth": n.depth,
        "expansion_order": n.expansion_order,
        "is_goal": n.is_goal,
        "node_id": n.node_id,
        "parent_id": n.parent_id,
        "producing_label": n.producing_label,
        "state_fingerprint": n.state_fingerprint,
        "state_hex": n.state_hex,
    })
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "frontier_high_water": m.frontier_high_water,
        "goal_state_fingerprint": m.goal_state_fingerprint,
        "max_depth": m.max_depth,
        "max_expansions": m.max_expansions,
        "root_state_fingerprint": m.root_state_fingerprint,
        "termination_reason": termination_reason_to_json(&m.termination_reason),
        "total_candidates_generated": m.total_candidates_generated,
        "total_dead_ends": m.total_dead_ends,
        "total_depth_limited": m.total_depth_limited,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_illegal_rejected": m.total_illegal_rejected,
        "total_states_visited": m.total_states_visited,
        "world_id": m.world_id,
    })
}

/// JSON form of a termination reason (`{"type": ..., ...}`).
#[must_use]
pub fn termination_reason_to_json(r: &TerminationReasonV1) -> serde_json::Value {
    match r {
        TerminationReasonV1::GoalReached { node_id } => {
            serde_json::json!({"node_id": node_id, "type": "goal_reached"})
        }
        TerminationReasonV1::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
        TerminationReasonV1::ExpansionBudgetExceeded => {
            serde_json::json!({"type": "expansion_budget_exceeded"})
        }
        TerminationReasonV1::DepthBudgetExceeded => {
            serde_json::json!({"type": "depth_budget_exceeded"})
        }
        TerminationReasonV1::MalformedMove {
            node_id,
            label,
            expected,
            actual,
        } => serde_json::json!({
            "actual": actual,
            "expected": expected,
            "label": label,
            "node_id": node_id,
            "type": "malformed_move",
        }),
        TerminationReasonV1::InternalPanic { stage } => {
            serde_json::json!({"stage": stage.as_str(), "type": "internal_panic"})
        }
    }
}
