//! Shared worlds for the blocks benchmark suites.
//!
//! Worlds scale with the number of objects so that a group can sweep sizes
//! with `BenchmarkId::from_parameter`.

use blocks_kernel::domain::object::ObjectRecord;
use blocks_kernel::domain::shape::Shape;
use blocks_kernel::domain::state::{BlocksState, Problem};
use blocks_search::{SearchContext, SearchPolicy};

/// Cycles through cube, cylinder and ring so every rule path is exercised.
fn shape_for(i: u32) -> Shape {
    match i % 3 {
        0 => Shape::Cube,
        1 => Shape::Cylinder,
        _ => Shape::Ring,
    }
}

/// `n` objects of mixed shapes, all standing on the table.
///
/// # Panics
///
/// Panics if the generated records fail validation.
#[must_use]
pub fn flat_state(n: u32) -> BlocksState {
    BlocksState::from_records(&flat_records(n)).expect("flat world validates")
}

fn flat_records(n: u32) -> Vec<ObjectRecord> {
    std::iter::once(ObjectRecord::table(0, "Table"))
        .chain((1..=n).map(|i| ObjectRecord::on(i, &format!("Obj{i}"), shape_for(i), 0)))
        .collect()
}

/// `n` cubes on the table; the goal stacks them into one tower, highest id
/// on top. Needs `n - 1` moves.
///
/// # Panics
///
/// Panics if the generated records fail validation.
#[must_use]
pub fn tower_problem(n: u32) -> Problem {
    let cube = |i: u32, support: u32| ObjectRecord::on(i, &format!("Cube{i}"), Shape::Cube, support);
    let start: Vec<ObjectRecord> = std::iter::once(ObjectRecord::table(0, "Table"))
        .chain((1..=n).map(|i| cube(i, 0)))
        .collect();
    let goal: Vec<ObjectRecord> = std::iter::once(ObjectRecord::table(0, "Table"))
        .chain((1..=n).map(|i| cube(i, i - 1)))
        .collect();
    Problem::from_records(&start, &goal).expect("tower world validates")
}

/// Pair a problem with a depth bound and optional worker count.
///
/// # Panics
///
/// Panics if the policy is invalid (zero depth or zero workers).
#[must_use]
pub fn bench_context(problem: Problem, max_depth: u32, workers: Option<usize>) -> SearchContext {
    let policy = SearchPolicy {
        workers,
        ..SearchPolicy::with_depth(max_depth)
    };
    SearchContext::new(problem, policy).expect("bench policy is valid")
}
