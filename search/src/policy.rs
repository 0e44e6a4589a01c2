//! Search policy types.

use crate::error::SearchError;

/// Optional budgets for a search call.
///
/// The default policy is unbounded: breadth-first search over a finite state
/// space terminates on its own, and any budget trades completeness for a
/// bound. A budgeted search that stops early reports
/// `ExpansionBudgetExceeded` or `DepthBudgetExceeded`, never `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions (frontier pops).
    pub max_expansions: u64,
    /// Deepest node (number of moves from the root) that may be created.
    pub max_depth: u32,
}

impl SearchPolicyV1 {
    /// The unbounded policy.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_expansions: u64::MAX,
            max_depth: u32::MAX,
        }
    }

    /// A policy with both budgets set.
    #[must_use]
    pub const fn bounded(max_expansions: u64, max_depth: u32) -> Self {
        Self {
            max_expansions,
            max_depth,
        }
    }

    /// Whether neither budget can ever bind.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_expansions == u64::MAX && self.max_depth == u32::MAX
    }

    /// Validate the policy before any search step is taken.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if either budget is zero: a
    /// zero expansion budget cannot even expand the root, and a zero depth
    /// budget forbids every move.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.max_depth == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_depth must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self::unbounded()
    }
}
