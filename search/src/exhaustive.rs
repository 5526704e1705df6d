//! Exhaustive depth-first enumeration of distinct solution paths.
//!
//! No state memoization: every action sequence up to the depth bound is
//! walked. A branch ends at the first target match. Two paths count as
//! distinct when their ordered description sequences differ, even if they
//! end in the same state.

use std::collections::BTreeSet;

use tracing::{info, warn};

use blocks_kernel::canon::key::CanonicalKey;
use blocks_kernel::domain::state::BlocksState;
use blocks_kernel::operators::action::{Action, Direction};

use crate::context::SearchContext;
use crate::expand::{successors, Successor};
use crate::outcome::{
    EnginePhase, ExhaustiveOutcome, SearchStats, SolutionPath, Step, Termination,
};

/// Progress is logged every this many expansions.
const PROGRESS_INTERVAL: u64 = 1000;

/// Enumerate every distinct solution within the depth bound.
///
/// `node_budget` caps expansions and `max_solutions` caps results; hitting
/// either returns the solutions found so far with `complete == false`. A
/// reverse search walks goal to start and presents each solution
/// start-to-goal.
#[must_use]
pub fn exhaustive_search(ctx: &SearchContext, direction: Direction) -> ExhaustiveOutcome {
    let seed = ctx.seed(direction).clone();
    let mut dfs = Dfs {
        ctx,
        direction,
        target: ctx.target_key(direction),
        stats: SearchStats::default(),
        phase: EnginePhase::Ready,
        seen: BTreeSet::new(),
        solutions: Vec::new(),
        actions: Vec::new(),
        states: vec![seed],
        frames: Vec::new(),
        stop: None,
    };

    dfs.phase.begin();
    info!(
        ?direction,
        max_depth = ctx.policy().max_depth,
        "exhaustive_start"
    );
    dfs.stats.nodes_created = 1;
    dfs.run();

    let termination = dfs.stop.unwrap_or(if dfs.stats.depth_limited > 0 {
        Termination::DepthBoundReached
    } else {
        Termination::Exhausted
    });
    dfs.phase.finish(termination);
    info!(
        ?termination,
        expansions = dfs.stats.expansions,
        solutions = dfs.solutions.len(),
        "search_complete"
    );

    ExhaustiveOutcome {
        direction,
        termination,
        complete: termination.is_complete(),
        nodes_expanded: dfs.stats.expansions,
        solutions: dfs.solutions,
        stats: dfs.stats,
    }
}

struct Dfs<'a> {
    ctx: &'a SearchContext,
    direction: Direction,
    target: CanonicalKey,
    stats: SearchStats,
    phase: EnginePhase,
    seen: BTreeSet<Vec<String>>,
    solutions: Vec<SolutionPath>,
    /// Actions on the current path with their descriptions.
    actions: Vec<(Action, String)>,
    /// `states[i]` is the state before `actions[i]`; one longer than `actions`.
    states: Vec<BlocksState>,
    /// One frame per expanded state on the current path.
    frames: Vec<Frame>,
    stop: Option<Termination>,
}

/// An expanded state and the successors not yet walked.
struct Frame {
    key: CanonicalKey,
    pending: std::vec::IntoIter<Successor>,
}

impl Dfs<'_> {
    /// Walk the tree with an explicit stack so the depth bound never turns
    /// into call depth.
    fn run(&mut self) {
        let prune = self.ctx.policy().prune_noop_transitions;
        if !self.enter() {
            return;
        }
        while self.stop.is_none() {
            let Some(frame) = self.frames.last_mut() else {
                break;
            };
            let Some(Successor { action, result }) = frame.pending.next() else {
                self.frames.pop();
                self.leave();
                continue;
            };
            let transition = match result {
                Ok(t) => t,
                Err(failure) => {
                    self.stats.transitions_failed += 1;
                    warn!(%action, %failure, "transition_failed");
                    continue;
                }
            };
            if prune && CanonicalKey::of(&transition.state) == frame.key {
                self.stats.noop_pruned += 1;
                continue;
            }
            self.stats.nodes_created += 1;
            self.actions.push((action, transition.description));
            self.states.push(transition.state);
            if !self.enter() {
                self.leave();
            }
        }
    }

    /// Visit the state at the top of the path. Returns `true` when it was
    /// expanded and a frame pushed; `false` for leaves and stops.
    fn enter(&mut self) -> bool {
        let ctx = self.ctx;
        let policy = ctx.policy();
        let key = match self.states.last() {
            Some(current) => CanonicalKey::of(current),
            None => return false,
        };
        if key == self.target {
            self.record();
            return false;
        }
        let depth = self.actions.len() as u64;
        if depth >= u64::from(policy.max_depth) {
            self.stats.depth_limited += 1;
            return false;
        }
        if policy
            .node_budget
            .is_some_and(|budget| self.stats.expansions >= budget)
        {
            self.stop = Some(Termination::BudgetExceeded);
            return false;
        }

        self.stats.expansions += 1;
        if self.stats.expansions % PROGRESS_INTERVAL == 0 {
            info!(
                nodes_expanded = self.stats.expansions,
                solutions = self.solutions.len(),
                depth,
                "exhaustive_progress"
            );
        }

        let Some(current) = self.states.last() else {
            return false;
        };
        let succ = successors(current, self.direction);
        self.stats.actions_generated += succ.len() as u64;
        self.frames.push(Frame {
            key,
            pending: succ.into_iter(),
        });
        true
    }

    /// Drop the last step of the path; the seed itself stays.
    fn leave(&mut self) {
        if self.actions.pop().is_some() {
            self.states.pop();
        }
    }

    fn record(&mut self) {
        let path = match self.direction {
            Direction::Forward => SolutionPath::new(
                self.actions
                    .iter()
                    .map(|(action, description)| Step {
                        action: *action,
                        description: description.clone(),
                    })
                    .collect(),
            ),
            Direction::Reverse => {
                let actions: Vec<Action> = self.actions.iter().map(|(a, _)| *a).collect();
                let states: Vec<&BlocksState> = self.states.iter().collect();
                SolutionPath::from_reverse(&actions, &states)
            }
        };
        let descriptions: Vec<String> = path.descriptions().map(str::to_string).collect();
        if !self.seen.insert(descriptions) {
            self.stats.duplicates_suppressed += 1;
            return;
        }
        info!(
            length = path.len(),
            solutions = self.solutions.len() + 1,
            "solution_found"
        );
        self.solutions.push(path);
        if self
            .ctx
            .policy()
            .max_solutions
            .is_some_and(|cap| self.solutions.len() >= cap)
        {
            self.stop = Some(Termination::SolutionLimitReached);
        }
    }
}
