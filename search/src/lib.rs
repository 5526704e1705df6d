//! Blocks Search: deterministic state-space search over the blocks kernel.
//!
//! This crate depends only on `blocks_kernel`. It does NOT depend on
//! `blocks_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! blocks_kernel  ←  blocks_search  ←  blocks_harness
//! (state, rules)    (engines, graph)   (documents, reports)
//! ```
//!
//! # Strategies
//!
//! - [`bfs`]: bounded BFS, first (shortest) solution
//! - [`bfs_all_solutions`]: bounded BFS that keeps every target hit
//! - [`reverse_bfs`]: BFS from the goal with the reverse generator
//! - [`exhaustive_search`]: DFS over all distinct action sequences
//!
//! Every strategy reads a [`SearchContext`] and returns an outcome whose
//! [`Termination`] says why it stopped. Only pre-flight problems are errors.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod bfs;
pub mod context;
pub mod error;
pub mod exhaustive;
mod expand;
pub mod export;
pub mod frontier;
pub mod outcome;
pub mod policy;
pub mod recorder;

pub use analysis::{GraphStats, SolutionAnalysis};
pub use bfs::{bfs, bfs_all_solutions, reverse_bfs};
pub use context::SearchContext;
pub use error::SearchError;
pub use exhaustive::exhaustive_search;
pub use export::{ExportNode, GraphExport};
pub use outcome::{
    EnginePhase, ExhaustiveOutcome, SearchOutcome, SearchStats, SolutionPath, Step, Termination,
};
pub use policy::SearchPolicy;
pub use recorder::{Node, NodeId, Recorder};
