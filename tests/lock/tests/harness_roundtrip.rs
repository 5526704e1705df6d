//! Harness round-trips through the filesystem: problem documents in,
//! report directories out and back.

use blocks_harness::{
    load_problem, read_graph, read_report_summary, read_solutions, run, write_report_dir,
    HarnessError, ProblemDocument, Strategy,
};
use blocks_kernel::operators::action::Direction;
use blocks_search::{SearchPolicy, Termination};
use lock_tests::{context, fixture_path, mixed_world, scenario_c};

#[test]
fn fixture_document_loads_with_its_policy() {
    let ctx = load_problem(&fixture_path("scenario_b.json")).unwrap();
    assert_eq!(ctx.policy().max_depth, 4);
    assert_eq!(ctx.policy().workers, Some(2));
    let report = run(&ctx, Strategy::Bfs).unwrap();
    assert_eq!(report.best().map(|p| p.len()), Some(2));
}

#[test]
fn report_dir_round_trip_for_every_strategy() {
    let ctx = context(mixed_world(), SearchPolicy::with_depth(3));
    for strategy in [
        Strategy::Bfs,
        Strategy::BfsAll {
            direction: Direction::Forward,
        },
        Strategy::BfsAll {
            direction: Direction::Reverse,
        },
        Strategy::Reverse,
        Strategy::Exhaustive {
            direction: Direction::Reverse,
        },
    ] {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(strategy.name());
        let report = run(&ctx, strategy).unwrap();
        let written = write_report_dir(&dir, &report).unwrap();

        assert_eq!(read_report_summary(&dir).unwrap(), written);
        assert_eq!(read_solutions(&dir).unwrap(), report.solutions);
        assert_eq!(read_graph(&dir).unwrap(), report.graph);
        assert_eq!(written.strategy, strategy);
        assert_eq!(written.shortest, Some(3));
    }
}

#[test]
fn unsolvable_problem_reports_exhaustion() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run(
        &context(scenario_c(), SearchPolicy::with_depth(2)),
        Strategy::Bfs,
    )
    .unwrap();
    let summary = write_report_dir(tmp.path(), &report).unwrap();
    assert_eq!(summary.solution_count, 0);
    assert_eq!(summary.shortest, None);
    assert!(summary.complete);
    assert!(matches!(
        summary.termination,
        Termination::Exhausted | Termination::DepthBoundReached
    ));
}

#[test]
fn document_written_from_context_loads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = context(
        mixed_world(),
        SearchPolicy {
            max_solutions: Some(2),
            ..SearchPolicy::with_depth(3)
        },
    );
    let path = tmp.path().join("problem.json");
    let doc = ProblemDocument::from_context(&ctx);
    std::fs::write(&path, serde_json::to_vec_pretty(&doc).unwrap()).unwrap();

    let loaded = load_problem(&path).unwrap();
    assert_eq!(loaded.problem(), ctx.problem());
    assert_eq!(loaded.policy(), ctx.policy());
}

#[test]
fn invalid_policy_in_document_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("problem.json");
    let mut doc = ProblemDocument::from_context(&context(mixed_world(), SearchPolicy::default()));
    doc.policy.workers = Some(0);
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
    let err = load_problem(&path).unwrap_err();
    assert!(matches!(err, HarnessError::Search(_)), "{err}");
}

#[test]
fn missing_document_is_an_io_error() {
    let err = load_problem(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, HarnessError::Io { .. }));
}
