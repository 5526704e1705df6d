//! Shared scenario fixtures for the lock tests and the `search_fixture`
//! binary.
//!
//! Every fixture returns a fresh [`Problem`]; tests pair it with whatever
//! [`SearchPolicy`] they need via [`context`].

use std::path::PathBuf;

use blocks_kernel::domain::object::ObjectRecord;
use blocks_kernel::domain::shape::Shape;
use blocks_kernel::domain::state::Problem;
use blocks_search::{SearchContext, SearchPolicy};

/// Scenario A: CubeB sits on CubeA; the goal puts both on the table.
///
/// # Panics
///
/// Panics if the fixture records stop validating.
#[must_use]
pub fn scenario_a() -> Problem {
    Problem::from_records(
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 0),
            ObjectRecord::on(2, "CubeB", Shape::Cube, 1),
        ],
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 0),
            ObjectRecord::on(2, "CubeB", Shape::Cube, 0),
        ],
    )
    .expect("scenario A validates")
}

/// Scenario B: a standing cylinder must end up inside a ring that has to be
/// laid down first.
///
/// # Panics
///
/// Panics if the fixture records stop validating.
#[must_use]
pub fn scenario_b() -> Problem {
    Problem::from_records(
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(3, "Cylinder", Shape::Cylinder, 0),
            ObjectRecord::on(4, "Ring", Shape::Ring, 0),
        ],
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(3, "Cylinder", Shape::Cylinder, 4),
            ObjectRecord::on(4, "Ring", Shape::Ring, 0).lying(true),
        ],
    )
    .expect("scenario B validates")
}

/// Scenario C: the goal has two cubes resting directly on a third cube,
/// which no sequence of legal actions can produce.
///
/// # Panics
///
/// Panics if the fixture records stop validating.
#[must_use]
pub fn scenario_c() -> Problem {
    Problem::from_records(
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 0),
            ObjectRecord::on(2, "CubeB", Shape::Cube, 0),
            ObjectRecord::on(3, "CubeC", Shape::Cube, 0),
        ],
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 0),
            ObjectRecord::on(2, "CubeB", Shape::Cube, 1),
            ObjectRecord::on(3, "CubeC", Shape::Cube, 1),
        ],
    )
    .expect("scenario C validates")
}

/// A mixed world: two cubes, a cylinder and a lying ring with a cube on it.
/// The goal stacks CubeA on the cylinder inside the ring and clears CubeB to
/// the table (three moves). Large enough to give the parallel expander real
/// levels.
///
/// # Panics
///
/// Panics if the fixture records stop validating.
#[must_use]
pub fn mixed_world() -> Problem {
    Problem::from_records(
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 0),
            ObjectRecord::on(2, "Ring", Shape::Ring, 0).lying(true),
            ObjectRecord::on(3, "CubeB", Shape::Cube, 2),
            ObjectRecord::on(4, "Cylinder", Shape::Cylinder, 0),
        ],
        &[
            ObjectRecord::table(0, "Table"),
            ObjectRecord::on(1, "CubeA", Shape::Cube, 4),
            ObjectRecord::on(2, "Ring", Shape::Ring, 0).lying(true),
            ObjectRecord::on(3, "CubeB", Shape::Cube, 0),
            ObjectRecord::on(4, "Cylinder", Shape::Cylinder, 2),
        ],
    )
    .expect("mixed world validates")
}

/// Pair a fixture with a policy.
///
/// # Panics
///
/// Panics if the policy is invalid.
#[must_use]
pub fn context(problem: Problem, policy: SearchPolicy) -> SearchContext {
    SearchContext::new(problem, policy).expect("policy is valid")
}

/// Absolute path of a file under the workspace `tests/fixtures/`.
///
/// # Panics
///
/// Panics if the crate is not nested two levels below the workspace root.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(std::path::Path::parent)
        .expect("workspace root exists")
        .join("tests/fixtures")
        .join(name)
}
