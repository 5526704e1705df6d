//! Structural properties of the action model, checked over every state
//! the generators reach within a small bound.

use std::collections::BTreeSet;

use blocks_kernel::canon::key::CanonicalKey;
use blocks_kernel::domain::object::ObjectId;
use blocks_kernel::domain::predicates::{can_lie_down, would_create_cycle};
use blocks_kernel::domain::state::{BlocksState, Problem};
use blocks_kernel::operators::action::{Action, Direction};
use blocks_kernel::operators::apply::{apply, ApplyFailure};
use blocks_kernel::operators::generate::{actions, forward_actions, reverse_actions};
use blocks_search::{
    bfs, bfs_all_solutions, exhaustive_search, reverse_bfs, SearchPolicy, SolutionPath,
};
use lock_tests::{context, mixed_world, scenario_a, scenario_b, scenario_c};

/// Distinct states reached from the seed of `direction` within `depth`.
fn reachable(problem: Problem, direction: Direction, depth: u32) -> Vec<BlocksState> {
    let ctx = context(problem, SearchPolicy::with_depth(depth));
    let out = match direction {
        Direction::Forward => bfs(&ctx),
        Direction::Reverse => reverse_bfs(&ctx),
    }
    .unwrap();
    let mut seen = BTreeSet::new();
    out.recorder
        .nodes()
        .iter()
        .filter(|n| seen.insert(CanonicalKey::of(&n.state)))
        .map(|n| n.state.clone())
        .collect()
}

/// Reachable states of every fixture, both directions.
fn corpus() -> Vec<BlocksState> {
    let mut states = Vec::new();
    for direction in [Direction::Forward, Direction::Reverse] {
        states.extend(reachable(mixed_world(), direction, 2));
        states.extend(reachable(scenario_b(), direction, 3));
        states.extend(reachable(scenario_c(), direction, 3));
    }
    assert!(states.len() > 50, "corpus too small: {}", states.len());
    states
}

// ---------------------------------------------------------------------------
// Acyclicity
// ---------------------------------------------------------------------------

#[test]
fn every_reachable_state_is_acyclic() {
    for state in corpus() {
        for id in state.ids() {
            let chain = state.support_chain(id);
            let distinct: BTreeSet<ObjectId> = chain.iter().copied().collect();
            assert_eq!(distinct.len(), chain.len(), "cycle in {}", CanonicalKey::of(&state));
            if id != state.table_id() {
                assert_eq!(chain.last(), Some(&state.table_id()));
            }
        }
        // Round-tripping through records re-runs the full validation.
        BlocksState::from_records(&state.to_records()).expect("reachable state validates");
    }
}

#[test]
fn generated_actions_always_apply() {
    for state in corpus() {
        for direction in [Direction::Forward, Direction::Reverse] {
            for action in actions(&state, direction) {
                let result = apply(&state, &action);
                assert!(
                    result.is_ok(),
                    "{action} rejected in {}: {result:?}",
                    CanonicalKey::of(&state)
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Inverses
// ---------------------------------------------------------------------------

#[test]
fn move_then_move_back_restores_state() {
    let mut checked = 0;
    for state in corpus() {
        for action in forward_actions(&state).into_iter().filter(Action::is_move) {
            let moved = apply(&state, &action).unwrap().state;
            let undo = action.inverse(&state).expect("mover has a support");
            assert!(matches!(undo, Action::MoveTo { .. }));
            // Leaving a cube that still carries something cannot be undone.
            let Ok(back) = apply(&moved, &undo) else {
                continue;
            };
            assert_eq!(CanonicalKey::of(&back.state), CanonicalKey::of(&state));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn reverse_actions_undo_with_a_legal_forward_step() {
    let mut checked = 0;
    for state in corpus() {
        for action in reverse_actions(&state) {
            let after = apply(&state, &action).unwrap().state;
            let forward = action.inverse(&state).expect("reverse mover has a support");
            let back = apply(&after, &forward).unwrap_or_else(|err| {
                panic!("{forward} illegal after {action} from {}: {err}", CanonicalKey::of(&state))
            });
            assert_eq!(CanonicalKey::of(&back.state), CanonicalKey::of(&state));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

#[test]
fn orientation_round_trip_restores_lying_flag() {
    let mut checked = 0;
    for state in corpus() {
        for id in state.ids().filter(|&id| can_lie_down(&state, id)) {
            let (first, second) = if state.is_lying(id) {
                (Action::StandUp { object: id }, Action::LayDown { object: id })
            } else {
                (Action::LayDown { object: id }, Action::StandUp { object: id })
            };
            let mid = apply(&state, &first).unwrap().state;
            assert_ne!(mid.is_lying(id), state.is_lying(id));
            let back = apply(&mid, &second).unwrap().state;
            assert_eq!(back.is_lying(id), state.is_lying(id));
            assert_eq!(back.support_of(id), state.support_of(id));
            assert_eq!(CanonicalKey::of(&back), CanonicalKey::of(&state));
            checked += 1;
        }
    }
    assert!(checked > 0);
}

// ---------------------------------------------------------------------------
// Reverse cycle guard
// ---------------------------------------------------------------------------

#[test]
fn reverse_generator_never_proposes_a_cycle() {
    for state in corpus() {
        for action in reverse_actions(&state) {
            if let Action::MoveTo { object, target } = action {
                assert!(!would_create_cycle(&state, object, target));
                assert!(!state.support_chain(target).contains(&object));
                assert_ne!(Some(target), state.support_of(object));
            }
        }
    }
}

#[test]
fn move_into_own_support_chain_is_rejected() {
    // CubeB rests on CubeA: CubeA cannot be placed on CubeB.
    let state = scenario_a().start().clone();
    let (a, b) = (ObjectId(1), ObjectId(2));
    assert!(would_create_cycle(&state, a, b));
    let err = apply(
        &state,
        &Action::MoveTo {
            object: a,
            target: b,
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ApplyFailure::NotMovable { .. } | ApplyFailure::WouldCreateCycle { .. }
    ));
    let err = apply(
        &state,
        &Action::MoveTo {
            object: b,
            target: b,
        },
    )
    .unwrap_err();
    assert_eq!(err, ApplyFailure::SelfTarget { object: b });
}

// ---------------------------------------------------------------------------
// Table invariance
// ---------------------------------------------------------------------------

#[test]
fn table_never_moves_or_reorients() {
    for state in corpus() {
        let table = state.table_id();
        assert_eq!(state.support_of(table), None);
        assert!(!state.is_lying(table));
        assert_eq!(CanonicalKey::of(&state).entries()[0], (table, None, false));

        let other = state.ids().find(|&id| id != table).unwrap();
        for action in [
            Action::Move {
                object: table,
                target: other,
            },
            Action::MoveTo {
                object: table,
                target: other,
            },
            Action::LayDown { object: table },
            Action::StandUp { object: table },
        ] {
            assert!(apply(&state, &action).is_err(), "{action} accepted");
        }
        for direction in [Direction::Forward, Direction::Reverse] {
            assert!(actions(&state, direction)
                .iter()
                .all(|a| a.object() != table));
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy agreement
// ---------------------------------------------------------------------------

#[test]
fn bfs_solution_is_minimal() {
    for problem in [scenario_a(), scenario_b(), mixed_world()] {
        let out = bfs(&context(problem, SearchPolicy::with_depth(4))).unwrap();
        let len = out.solution().expect("solvable").len();
        let shallowest_target = out
            .recorder
            .target_nodes()
            .map(|id| out.recorder.nodes()[id].depth)
            .min();
        assert_eq!(shallowest_target, Some(u32::try_from(len).unwrap()));
    }
}

#[test]
fn exhaustive_contains_the_bfs_length() {
    for problem in [scenario_a(), scenario_b(), mixed_world()] {
        let ctx = context(problem, SearchPolicy::with_depth(3));
        let shortest = bfs(&ctx).unwrap().solution().map(|p| p.len());
        for direction in [Direction::Forward, Direction::Reverse] {
            let out = exhaustive_search(&ctx, direction);
            assert!(!out.solutions.is_empty());
            assert_eq!(out.solutions.iter().map(|p| p.len()).min(), shortest);
        }
    }
}

fn replay(problem: &Problem, path: &SolutionPath) {
    let mut state = problem.start().clone();
    for step in path.steps() {
        let t = apply(&state, &step.action)
            .unwrap_or_else(|err| panic!("{} rejected: {err}", step.action));
        assert_eq!(t.description, step.description);
        state = t.state;
    }
    assert_eq!(CanonicalKey::of(&state), CanonicalKey::of(problem.goal()));
}

#[test]
fn reverse_solution_replays_forward() {
    for problem in [scenario_a(), scenario_b(), mixed_world()] {
        let ctx = context(problem, SearchPolicy::with_depth(4));
        let out = reverse_bfs(&ctx).unwrap();
        replay(ctx.problem(), out.solution().expect("solvable"));
    }
}

#[test]
fn every_reverse_presented_path_replays_forward() {
    for problem in [scenario_a(), scenario_b(), scenario_c(), mixed_world()] {
        let ctx = context(problem, SearchPolicy::with_depth(3));
        let all = bfs_all_solutions(&ctx, Direction::Reverse).unwrap();
        let exhaustive = exhaustive_search(&ctx, Direction::Reverse);
        for path in all.solutions.iter().chain(&exhaustive.solutions) {
            replay(ctx.problem(), path);
        }
    }
    // The crowded goal has no predecessor at all.
    let ctx = context(scenario_c(), SearchPolicy::with_depth(3));
    let out = reverse_bfs(&ctx).unwrap();
    assert!(out.solution().is_none());
    assert_eq!(out.stats.actions_generated, 0);
    assert_eq!(out.recorder.nodes().len(), 1);
}
