//! Bounded breadth-first search, forward or reverse.
//!
//! Loop per dequeued node:
//! 1. Target match: record a solution; stop (first-solution mode) or keep
//!    going and expand the node like any other (all-solutions mode).
//! 2. Depth bound: nodes at `max_depth` are counted and not expanded.
//! 3. Budget: stop with `BudgetExceeded` once `node_budget` expansions ran.
//! 4. Expand: every successor whose `(key, depth)` is new becomes a node.
//!
//! With `workers` set, successors of the remaining nodes of the current
//! level are computed on the pool the first time one of them is expanded.
//! Merging still happens here, one parent at a time in queue order, so the
//! recorded graph is identical to a sequential run.

use std::collections::HashMap;

use tracing::{debug, info, trace, warn};

use blocks_kernel::canon::key::CanonicalKey;
use blocks_kernel::domain::state::BlocksState;
use blocks_kernel::operators::action::{Action, Direction};

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::expand::{successors, LevelExpander, Successor};
use crate::frontier::Frontier;
use crate::outcome::{EnginePhase, SearchOutcome, SearchStats, SolutionPath, Termination};
use crate::recorder::{NodeId, Recorder};

/// Find the shortest start-to-goal path within the depth bound.
///
/// # Errors
///
/// Returns [`SearchError::WorkerPool`] if `workers` is set and the pool
/// cannot be built.
pub fn bfs(ctx: &SearchContext) -> Result<SearchOutcome, SearchError> {
    run(ctx, Direction::Forward, GoalMode::First)
}

/// Search from the goal back to the start with the reverse generator.
///
/// The solution is presented start-to-goal: steps reversed, each replaced
/// by its inverse. The recorded graph keeps the goal as its root.
///
/// # Errors
///
/// Returns [`SearchError::WorkerPool`] if `workers` is set and the pool
/// cannot be built.
pub fn reverse_bfs(ctx: &SearchContext) -> Result<SearchOutcome, SearchError> {
    run(ctx, Direction::Reverse, GoalMode::First)
}

/// Every path BFS reaches within the bound, shortest first.
///
/// Same machinery as [`bfs`], but a target node is recorded and then
/// expanded instead of ending the search, so longer paths that pass
/// through the target are found too.
///
/// # Errors
///
/// Returns [`SearchError::WorkerPool`] if `workers` is set and the pool
/// cannot be built.
pub fn bfs_all_solutions(
    ctx: &SearchContext,
    direction: Direction,
) -> Result<SearchOutcome, SearchError> {
    run(ctx, direction, GoalMode::All)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoalMode {
    First,
    All,
}

fn run(
    ctx: &SearchContext,
    direction: Direction,
    goal: GoalMode,
) -> Result<SearchOutcome, SearchError> {
    let expander = ctx.policy().workers.map(LevelExpander::new).transpose()?;
    let mut engine = BfsEngine {
        ctx,
        direction,
        goal,
        target: ctx.target_key(direction),
        recorder: Recorder::new(),
        frontier: Frontier::new(),
        stats: SearchStats::default(),
        phase: EnginePhase::Ready,
        found: Vec::new(),
        expander,
        prefetched: HashMap::new(),
    };
    let termination = engine.explore();
    Ok(engine.into_outcome(termination))
}

struct BfsEngine<'a> {
    ctx: &'a SearchContext,
    direction: Direction,
    goal: GoalMode,
    target: CanonicalKey,
    recorder: Recorder,
    frontier: Frontier,
    stats: SearchStats,
    phase: EnginePhase,
    found: Vec<NodeId>,
    expander: Option<LevelExpander>,
    prefetched: HashMap<NodeId, Vec<Successor>>,
}

impl BfsEngine<'_> {
    fn explore(&mut self) -> Termination {
        let ctx = self.ctx;
        let policy = ctx.policy();
        self.phase.begin();
        info!(
            direction = ?self.direction,
            max_depth = policy.max_depth,
            workers = policy.workers.unwrap_or(1),
            "bfs_start"
        );

        let seed = ctx.seed(self.direction).clone();
        let key = CanonicalKey::of(&seed);
        let target_match = key == self.target;
        self.frontier.discover(key, 0);
        let root = self.recorder.create_node(seed, None, None, 0, target_match);
        self.stats.nodes_created += 1;
        self.frontier.push(root);

        let mut level = 0;
        let termination = loop {
            let Some(id) = self.frontier.pop() else {
                break if self.stats.depth_limited > 0 {
                    Termination::DepthBoundReached
                } else {
                    Termination::Exhausted
                };
            };
            let node = &self.recorder.nodes()[id];
            let (depth, target_match) = (node.depth, node.target_match);

            if depth > level {
                debug!(
                    level,
                    nodes = self.recorder.len(),
                    queued = self.frontier.len() + 1,
                    "bfs_level_complete"
                );
                level = depth;
            }

            if target_match {
                self.found.push(id);
                info!(node_id = id, depth, "solution_found");
                if self.goal == GoalMode::First {
                    break Termination::SolutionFound { node_id: id };
                }
            }
            if depth >= policy.max_depth {
                self.stats.depth_limited += 1;
                continue;
            }
            if policy
                .node_budget
                .is_some_and(|budget| self.stats.expansions >= budget)
            {
                break Termination::BudgetExceeded;
            }
            self.expand(id);
        };

        self.stats.frontier_high_water = self.frontier.high_water();
        self.phase.finish(termination);
        info!(
            ?termination,
            nodes = self.stats.nodes_created,
            expansions = self.stats.expansions,
            solutions = self.found.len(),
            "search_complete"
        );
        termination
    }

    fn expand(&mut self, id: NodeId) {
        self.stats.expansions += 1;
        let succ = self.successors_of(id);
        self.stats.actions_generated += succ.len() as u64;

        let node = &self.recorder.nodes()[id];
        let parent_key = CanonicalKey::of(&node.state);
        let depth = node.depth + 1;
        let prune = self.ctx.policy().prune_noop_transitions;

        for Successor { action, result } in succ {
            let transition = match result {
                Ok(t) => t,
                Err(failure) => {
                    self.stats.transitions_failed += 1;
                    warn!(node_id = id, %action, %failure, "transition_failed");
                    continue;
                }
            };
            let key = CanonicalKey::of(&transition.state);
            if prune && key == parent_key {
                self.stats.noop_pruned += 1;
                continue;
            }
            let target_match = key == self.target;
            if !self.frontier.discover(key, depth) {
                self.stats.duplicates_suppressed += 1;
                continue;
            }
            let child = self.recorder.create_node(
                transition.state,
                Some(id),
                Some((action, transition.description)),
                depth,
                target_match,
            );
            self.stats.nodes_created += 1;
            trace!(node_id = child, parent = id, %action, depth, "node_created");
            self.frontier.push(child);
        }
    }

    fn successors_of(&mut self, id: NodeId) -> Vec<Successor> {
        if self.expander.is_some() {
            if !self.prefetched.contains_key(&id) {
                self.prefetch_level(id);
            }
            if let Some(succ) = self.prefetched.remove(&id) {
                return succ;
            }
        }
        successors(&self.recorder.nodes()[id].state, self.direction)
    }

    /// Compute successors for `id` and the queued nodes of its level that
    /// will be expanded before the level ends, the budget runs out, or (in
    /// first-solution mode) a target is dequeued.
    fn prefetch_level(&mut self, id: NodeId) {
        let Some(expander) = &self.expander else {
            return;
        };
        let nodes = self.recorder.nodes();
        let depth = nodes[id].depth;
        let remaining = self
            .ctx
            .policy()
            .node_budget
            .map_or(u64::MAX, |b| b.saturating_sub(self.stats.expansions));

        let mut batch: Vec<(NodeId, &BlocksState)> = Vec::new();
        for qid in std::iter::once(id).chain(self.frontier.queued()) {
            let node = &nodes[qid];
            if node.depth != depth || batch.len() as u64 >= remaining {
                break;
            }
            if node.target_match && self.goal == GoalMode::First {
                break;
            }
            batch.push((qid, &node.state));
        }
        trace!(depth, batch = batch.len(), "level_prefetch");
        let expanded = expander.expand(&batch, self.direction);
        self.prefetched.extend(expanded);
    }

    fn into_outcome(self, termination: Termination) -> SearchOutcome {
        let solutions = self
            .found
            .iter()
            .map(|&id| present_path(&self.recorder, id, self.direction))
            .collect();
        SearchOutcome {
            direction: self.direction,
            termination,
            solutions,
            stats: self.stats,
            recorder: self.recorder,
        }
    }
}

/// The root-to-`id` path in start-to-goal presentation.
pub(crate) fn present_path(recorder: &Recorder, id: NodeId, direction: Direction) -> SolutionPath {
    match direction {
        Direction::Forward => recorder.reconstruct_path(id),
        Direction::Reverse => {
            let lineage = recorder.lineage(id);
            let nodes = recorder.nodes();
            let states: Vec<&BlocksState> = lineage.iter().map(|&n| &nodes[n].state).collect();
            let actions: Vec<Action> = lineage
                .iter()
                .skip(1)
                .filter_map(|&n| nodes[n].action)
                .collect();
            SolutionPath::from_reverse(&actions, &states)
        }
    }
}
