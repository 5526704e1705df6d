//! Search outcomes: termination reasons, engine phase, counters, paths.

use serde::{Deserialize, Serialize};

use blocks_kernel::domain::state::BlocksState;
use blocks_kernel::operators::action::{Action, Direction};

use crate::recorder::{NodeId, Recorder};

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// BFS dequeued the target at `node_id`.
    SolutionFound { node_id: NodeId },
    /// Frontier emptied and no node was cut by the depth bound.
    Exhausted,
    /// Frontier emptied and at least one node was cut by the depth bound.
    DepthBoundReached,
    /// `node_budget` expansions were spent. Results are partial.
    BudgetExceeded,
    /// `max_solutions` distinct solutions were found. Results are partial.
    SolutionLimitReached,
}

impl Termination {
    /// Whether the explored space is all there is within the depth bound.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self, Self::BudgetExceeded | Self::SolutionLimitReached)
    }

    /// No solution within the bound, and the search was not cut short.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted | Self::DepthBoundReached)
    }
}

/// Engine lifecycle: `Ready → Exploring → Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnginePhase {
    #[default]
    Ready,
    Exploring,
    Finished(Termination),
}

impl EnginePhase {
    pub(crate) fn begin(&mut self) {
        debug_assert_eq!(*self, Self::Ready, "engine started twice");
        *self = Self::Exploring;
    }

    pub(crate) fn finish(&mut self, termination: Termination) {
        debug_assert_eq!(*self, Self::Exploring, "engine finished outside exploration");
        *self = Self::Finished(termination);
    }

    /// The termination, once finished.
    #[must_use]
    pub const fn termination(&self) -> Option<Termination> {
        match self {
            Self::Finished(t) => Some(*t),
            Self::Ready | Self::Exploring => None,
        }
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes_created: u64,
    pub expansions: u64,
    pub actions_generated: u64,
    /// Generated actions that `apply` rejected. Nonzero means the generator
    /// and the transition function disagree.
    pub transitions_failed: u64,
    pub noop_pruned: u64,
    pub duplicates_suppressed: u64,
    pub depth_limited: u64,
    pub frontier_high_water: u64,
}

/// One action of a solution with its description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub action: Action,
    pub description: String,
}

/// An ordered list of steps from start to goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionPath {
    steps: Vec<Step>,
}

impl SolutionPath {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.steps.iter().map(|s| s.action)
    }

    pub fn descriptions(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(|s| s.description.as_str())
    }

    /// Turn a goal-to-start path into start-to-goal presentation.
    ///
    /// `states[i]` is the state `actions[i]` was applied to, and
    /// `states[actions.len()]` is the start state. The result walks the
    /// states backwards, undoing each action with its inverse.
    #[must_use]
    pub fn from_reverse(actions: &[Action], states: &[&BlocksState]) -> Self {
        let steps = actions
            .iter()
            .enumerate()
            .rev()
            .map(|(i, action)| {
                let before = states[i];
                let after = states[i + 1];
                // Only non-table objects act, so they always have a support.
                let forward = action.inverse(before).unwrap_or(*action);
                Step {
                    action: forward,
                    description: forward.describe(after.catalog()),
                }
            })
            .collect();
        Self { steps }
    }
}

/// Result of a BFS strategy.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub direction: Direction,
    pub termination: Termination,
    /// In discovery order. At most one unless all solutions were requested.
    pub solutions: Vec<SolutionPath>,
    pub stats: SearchStats,
    pub recorder: Recorder,
}

impl SearchOutcome {
    /// The first (shortest) solution.
    #[must_use]
    pub fn solution(&self) -> Option<&SolutionPath> {
        self.solutions.first()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.termination.is_complete()
    }
}

/// Result of exhaustive DFS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustiveOutcome {
    pub direction: Direction,
    pub termination: Termination,
    /// Distinct description sequences, in discovery order.
    pub solutions: Vec<SolutionPath>,
    /// `false` when the budget or the solution cap cut the search short.
    pub complete: bool,
    pub nodes_expanded: u64,
    pub stats: SearchStats,
}
