//! Search policy: depth bound, budgets and expansion options.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Search configuration. Every field has a default, so a policy can be
/// embedded partially in a problem document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    /// Maximum number of actions in a candidate solution.
    pub max_depth: u32,
    /// Hard cap on node expansions, all strategies.
    pub node_budget: Option<u64>,
    /// Discard transitions that leave the canonical key unchanged.
    pub prune_noop_transitions: bool,
    /// Expand each BFS level on a pool of this many threads.
    pub workers: Option<usize>,
    /// Export the explored graph, with per-node state records.
    pub record_graph: bool,
    /// Exhaustive search stops after this many distinct solutions.
    pub max_solutions: Option<usize>,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_depth: 6,
            node_budget: None,
            prune_noop_transitions: true,
            workers: None,
            record_graph: true,
            max_solutions: None,
        }
    }
}

impl SearchPolicy {
    /// Policy with the given depth bound and defaults elsewhere.
    #[must_use]
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Reject zero bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_depth` is zero or any
    /// optional cap is `Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        let zero = if self.max_depth == 0 {
            Some("max_depth")
        } else if self.node_budget == Some(0) {
            Some("node_budget")
        } else if self.workers == Some(0) {
            Some("workers")
        } else if self.max_solutions == Some(0) {
            Some("max_solutions")
        } else {
            None
        };
        match zero {
            Some(field) => Err(SearchError::InvalidPolicy {
                detail: format!("{field} must be at least 1"),
            }),
            None => Ok(()),
        }
    }
}
