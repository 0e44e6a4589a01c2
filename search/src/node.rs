//! Core search node type.

use ferry_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::contract::SearchState;

/// Domain for search node fingerprints.
pub const DOMAIN_SEARCH_NODE: HashDomain = HashDomain::SearchNode;

/// An immutable search node.
///
/// Nodes are numbered in discovery order, so `node_id` doubles as the index
/// into the node table kept by the search. `parent_id` and `producing_label`
/// are the back reference used to rebuild the path once a goal is found.
#[derive(Debug, Clone)]
pub struct SearchNodeV1<S> {
    /// Monotonic node identifier (root = 0).
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// Full immutable state at this node.
    pub state: S,
    /// Canonical hash of the state's identity bytes.
    pub state_fingerprint: ContentHash,
    /// Number of moves from the root (root = 0).
    pub depth: u32,
    /// Label of the move that produced this node from its parent.
    pub producing_label: Option<String>,
}

impl<S: SearchState> SearchNodeV1<S> {
    /// Build the root node (id 0, depth 0).
    #[must_use]
    pub fn root(state: S) -> Self {
        let state_fingerprint = state_fingerprint(&state);
        Self {
            node_id: 0,
            parent_id: None,
            state,
            state_fingerprint,
            depth: 0,
            producing_label: None,
        }
    }

    /// Build a child of `parent` reached by the move `label`.
    #[must_use]
    pub fn child(node_id: u64, parent: &Self, state: S, label: String) -> Self {
        let state_fingerprint = state_fingerprint(&state);
        Self {
            node_id,
            parent_id: Some(parent.node_id),
            state,
            state_fingerprint,
            depth: parent.depth.saturating_add(1),
            producing_label: Some(label),
        }
    }
}

/// Fingerprint a state: `canonical_hash(SearchNode, identity_bytes)`.
#[must_use]
pub fn state_fingerprint<S: SearchState>(state: &S) -> ContentHash {
    canonical_hash(DOMAIN_SEARCH_NODE, &state.identity_bytes())
}
