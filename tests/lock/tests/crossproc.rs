//! Cross-process determinism: spawn `search_fixture` under several working
//! directories and environment variants and require identical stdout.

use std::path::Path;
use std::process::Command;

/// `cargo test` puts test binaries in `target/<profile>/deps/`; the fixture
/// binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

fn run_variant(work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    command
        .arg(lock_tests::fixture_path("scenario_b.json"))
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }
    let output = command
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin}: {e}"));
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_output_is_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists");

    let baseline = run_variant(workspace_root, &[]);
    let other_cwd = run_variant(tmp.path(), &[("LC_ALL", "C")]);
    let noisy_logs = run_variant(
        tmp.path(),
        &[("LANG", "en_US.UTF-8"), ("RUST_LOG", "trace")],
    );

    assert_eq!(baseline, other_cwd);
    assert_eq!(baseline, noisy_logs);
}

#[test]
fn crossproc_output_reports_scenario_b() {
    let tmp = tempfile::tempdir().unwrap();
    let out = run_variant(tmp.path(), &[]);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines.contains(&"solution=LayDown(4),Move(3, 4)"), "{out}");
    assert!(lines.contains(&"reverse_solution_len=2"), "{out}");
    assert!(lines.contains(&"exhaustive_complete=true"), "{out}");
    let digest = lines
        .iter()
        .find_map(|l| l.strip_prefix("graph_digest="))
        .expect("graph_digest line");
    assert!(digest.starts_with("sha256:"));
    assert_eq!(digest.len(), "sha256:".len() + 64);
}
