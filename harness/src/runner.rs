//! Harness runner: search a puzzle and package the outcome as a report.
//!
//! The runner uses ONLY search APIs: `search`, `labels_or_error`, graph
//! serialization. It does not implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! world.initial_state() / goal_state()
//!   → search() → graph.digest()
//!   → labels_or_error() → render_outcome()
//!   → report JSON → canonical bytes → report digest
//! ```

use ferry_kernel::proof::canon::{canonical_json_bytes, CanonError};
use ferry_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use ferry_search::contract::{GoalV1, SearchState};
use ferry_search::error::{PathError, SearchError};
use ferry_search::graph::{termination_reason_to_json, SearchGraphV1};
use ferry_search::path::labels_or_error;
use ferry_search::policy::SearchPolicyV1;
use ferry_search::search::search;
use tracing::info;

use crate::contract::PuzzleWorldV1;
use crate::render::render_outcome;

/// Domain prefix for report digests.
pub const DOMAIN_SEARCH_REPORT: HashDomain = HashDomain::SearchReport;

/// Schema tag written into every report.
pub const REPORT_SCHEMA_VERSION: &str = "search_report.v1";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    /// The search refused to start.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The graph or report could not be serialized.
    #[error(transparent)]
    Canon(#[from] CanonError),
}

/// Outcome of one puzzle run, bound to its audit graph by digest.
#[derive(Debug)]
pub struct SearchReportV1 {
    pub world_id: String,
    /// The full audit trail.
    pub graph: SearchGraphV1,
    /// Digest of `graph`'s canonical JSON bytes.
    pub graph_digest: ContentHash,
    /// Labels, or why there are none.
    pub outcome: Result<Vec<String>, PathError>,
    /// Identity bytes (hex) of every state on the solution path, root first.
    pub solution_states_hex: Option<Vec<String>>,
    /// `outcome` rendered for people.
    pub rendered: Vec<String>,
    /// Canonical JSON bytes of the report.
    pub canonical_bytes: Vec<u8>,
    /// Digest of `canonical_bytes`.
    pub digest: ContentHash,
}

impl SearchReportV1 {
    /// The solution labels, if one was found.
    #[must_use]
    pub fn solution(&self) -> Option<&[String]> {
        self.outcome.as_ref().ok().map(Vec::as_slice)
    }
}

/// Search `world` from its initial state to its goal state.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the search rejects its inputs before
/// starting (illegal initial state, dimension mismatch, zero budgets), and
/// [`RunError::Canon`] if serialization fails.
pub fn run_search<W: PuzzleWorldV1 + ?Sized>(
    world: &W,
    policy: &SearchPolicyV1,
) -> Result<SearchReportV1, RunError> {
    let goal = GoalV1::State(world.goal_state());
    let result = search(world, world.initial_state(), &goal, policy)?;

    let graph_digest = result.graph.digest()?;
    let outcome = labels_or_error(&result);
    let solution_states_hex = result.solution_states().map(|states| {
        states
            .iter()
            .map(|s| hex::encode(s.identity_bytes()))
            .collect::<Vec<_>>()
    });
    let rendered = render_outcome(&outcome);

    let value = serde_json::json!({
        "graph_digest": graph_digest.as_str(),
        "rendered": rendered,
        "schema_version": REPORT_SCHEMA_VERSION,
        "solution": outcome.as_ref().ok(),
        "solution_states_hex": solution_states_hex,
        "termination_reason": termination_reason_to_json(&result.graph.metadata.termination_reason),
        "total_expansions": result.graph.metadata.total_expansions,
        "total_states_visited": result.graph.metadata.total_states_visited,
        "world_id": world.world_id(),
    });
    let canonical_bytes = canonical_json_bytes(&value)?;
    let digest = canonical_hash(DOMAIN_SEARCH_REPORT, &canonical_bytes);

    info!(
        world_id = world.world_id(),
        termination = ?result.graph.metadata.termination_reason,
        expansions = result.graph.metadata.total_expansions,
        states_visited = result.graph.metadata.total_states_visited,
        solution_len = outcome.as_ref().map_or(0, Vec::len),
        digest = %digest,
        "search run complete"
    );

    Ok(SearchReportV1 {
        world_id: world.world_id().to_string(),
        graph: result.graph,
        graph_digest,
        outcome,
        solution_states_hex,
        rendered,
        canonical_bytes,
        digest,
    })
}
