//! Strategy dispatch: run one search and fold the result into a report.
//!
//! The runner owns no search logic. It picks the engine for a
//! [`Strategy`], then attaches the analysis and (optionally) the graph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use blocks_kernel::operators::action::Direction;
use blocks_search::{
    bfs, bfs_all_solutions, exhaustive_search, reverse_bfs, GraphExport, SearchContext,
    SearchOutcome, SearchStats, SolutionAnalysis, SolutionPath, Termination,
};

use crate::error::HarnessError;

/// Which engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Forward BFS, first solution.
    Bfs,
    /// BFS keeping every solution within the depth bound.
    BfsAll { direction: Direction },
    /// BFS from the goal, presented start to goal.
    Reverse,
    /// DFS over all distinct action sequences.
    Exhaustive { direction: Direction },
}

impl Strategy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::BfsAll {
                direction: Direction::Forward,
            } => "bfs_all",
            Self::BfsAll {
                direction: Direction::Reverse,
            } => "bfs_all_reverse",
            Self::Reverse => "reverse",
            Self::Exhaustive {
                direction: Direction::Forward,
            } => "exhaustive",
            Self::Exhaustive {
                direction: Direction::Reverse,
            } => "exhaustive_reverse",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "bfs_all" | "all" => Ok(Self::BfsAll {
                direction: Direction::Forward,
            }),
            "bfs_all_reverse" => Ok(Self::BfsAll {
                direction: Direction::Reverse,
            }),
            "reverse" | "reverse_bfs" => Ok(Self::Reverse),
            "exhaustive" => Ok(Self::Exhaustive {
                direction: Direction::Forward,
            }),
            "exhaustive_reverse" => Ok(Self::Exhaustive {
                direction: Direction::Reverse,
            }),
            other => Err(HarnessError::Parse {
                what: "strategy".into(),
                detail: format!("unknown strategy {other:?}"),
            }),
        }
    }
}

/// Everything one run produced, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: Strategy,
    pub termination: Termination,
    /// `false` when a budget or solution cap cut the run short.
    pub complete: bool,
    pub solutions: Vec<SolutionPath>,
    pub analysis: SolutionAnalysis,
    pub stats: SearchStats,
    /// Present for BFS strategies when the policy records the graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphExport>,
}

impl RunReport {
    /// The shortest solution found, if any.
    #[must_use]
    pub fn best(&self) -> Option<&SolutionPath> {
        self.solutions.iter().min_by_key(|p| p.len())
    }

    fn from_bfs(strategy: Strategy, outcome: SearchOutcome, record_graph: bool) -> Self {
        let graph = record_graph.then(|| outcome.recorder.export_graph(true));
        Self {
            strategy,
            termination: outcome.termination,
            complete: outcome.termination.is_complete(),
            analysis: SolutionAnalysis::of(&outcome.solutions),
            solutions: outcome.solutions,
            stats: outcome.stats,
            graph,
        }
    }
}

/// Run `strategy` on `ctx`.
///
/// # Errors
///
/// Returns [`HarnessError::Search`] if the engine cannot start (for example
/// the worker pool fails to build).
pub fn run(ctx: &SearchContext, strategy: Strategy) -> Result<RunReport, HarnessError> {
    let record_graph = ctx.policy().record_graph;
    let report = match strategy {
        Strategy::Bfs => RunReport::from_bfs(strategy, bfs(ctx)?, record_graph),
        Strategy::BfsAll { direction } => RunReport::from_bfs(
            strategy,
            bfs_all_solutions(ctx, direction)?,
            record_graph,
        ),
        Strategy::Reverse => RunReport::from_bfs(strategy, reverse_bfs(ctx)?, record_graph),
        Strategy::Exhaustive { direction } => {
            let outcome = exhaustive_search(ctx, direction);
            RunReport {
                strategy,
                termination: outcome.termination,
                complete: outcome.complete,
                analysis: SolutionAnalysis::of(&outcome.solutions),
                solutions: outcome.solutions,
                stats: outcome.stats,
                graph: None,
            }
        }
    };
    info!(
        strategy = %strategy,
        solutions = report.solutions.len(),
        complete = report.complete,
        expansions = report.stats.expansions,
        "run_complete"
    );
    Ok(report)
}
