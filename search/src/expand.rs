//! Successor computation, sequential and on a worker pool.
//!
//! Computing successors only reads the parent state, so a whole BFS level
//! can be computed concurrently. Merging the results into the frontier and
//! the recorder stays with the single engine that owns them.

use rayon::prelude::*;

use blocks_kernel::domain::state::BlocksState;
use blocks_kernel::operators::action::{Action, Direction};
use blocks_kernel::operators::apply::{apply, ApplyResult};
use blocks_kernel::operators::generate::actions;

use crate::error::SearchError;
use crate::recorder::NodeId;

/// A generated action and what applying it produced.
#[derive(Debug)]
pub(crate) struct Successor {
    pub action: Action,
    pub result: ApplyResult,
}

/// Generate and apply every action for `state`, in generator order.
pub(crate) fn successors(state: &BlocksState, direction: Direction) -> Vec<Successor> {
    actions(state, direction)
        .into_iter()
        .map(|action| Successor {
            result: apply(state, &action),
            action,
        })
        .collect()
}

/// A bounded pool that computes successors for a batch of nodes.
pub(crate) struct LevelExpander {
    pool: rayon::ThreadPool,
}

impl std::fmt::Debug for LevelExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelExpander")
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl LevelExpander {
    pub(crate) fn new(workers: usize) -> Result<Self, SearchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("blocks-expand-{i}"))
            .build()
            .map_err(|e| SearchError::WorkerPool {
                detail: e.to_string(),
            })?;
        Ok(Self { pool })
    }

    /// Successors for each node of `batch`, returned in batch order.
    pub(crate) fn expand(
        &self,
        batch: &[(NodeId, &BlocksState)],
        direction: Direction,
    ) -> Vec<(NodeId, Vec<Successor>)> {
        self.pool.install(|| {
            batch
                .par_iter()
                .map(|&(id, state)| (id, successors(state, direction)))
                .collect()
        })
    }
}
