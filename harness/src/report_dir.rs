//! Report directory persistence.
//!
//! # Layout
//!
//! ```text
//! <dir>/
//!   summary.json     canonical JSON, termination + counters + graph digest
//!   solutions.json   canonical JSON, every solution path
//!   graph.json       canonical JSON, explored graph (BFS runs only)
//! ```
//!
//! Every file is written through a temp file and a rename. Reading back
//! checks `graph.json` against the digest recorded in the summary.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use blocks_kernel::canon::json::to_canonical_bytes;
use blocks_search::{GraphExport, SearchStats, SolutionPath, Termination};

use crate::error::HarnessError;
use crate::runner::{RunReport, Strategy};

const SUMMARY_FILENAME: &str = "summary.json";
const SOLUTIONS_FILENAME: &str = "solutions.json";
const GRAPH_FILENAME: &str = "graph.json";

/// The `summary.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub strategy: Strategy,
    pub termination: Termination,
    pub complete: bool,
    pub solution_count: usize,
    pub shortest: Option<usize>,
    pub stats: SearchStats,
    /// Digest of `graph.json`, when one was written.
    pub graph_digest: Option<String>,
}

/// Write `report` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] on filesystem failure and
/// [`HarnessError::Canon`] if a document fails canonical serialization.
pub fn write_report_dir(dir: &Path, report: &RunReport) -> Result<ReportSummary, HarnessError> {
    std::fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, &e))?;

    let graph_digest = match &report.graph {
        Some(graph) => {
            write_atomic(&dir.join(GRAPH_FILENAME), &graph.to_canonical_bytes()?)?;
            Some(graph.digest()?.as_str().to_string())
        }
        None => None,
    };

    write_atomic(
        &dir.join(SOLUTIONS_FILENAME),
        &to_canonical_bytes(&report.solutions)?,
    )?;

    let summary = ReportSummary {
        strategy: report.strategy,
        termination: report.termination,
        complete: report.complete,
        solution_count: report.solutions.len(),
        shortest: report.analysis.shortest,
        stats: report.stats,
        graph_digest,
    };
    write_atomic(&dir.join(SUMMARY_FILENAME), &to_canonical_bytes(&summary)?)?;

    info!(
        dir = %dir.display(),
        solutions = summary.solution_count,
        graph = summary.graph_digest.is_some(),
        "report_written"
    );
    Ok(summary)
}

/// Read `summary.json`.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] if the file is missing and
/// [`HarnessError::Parse`] if it is malformed.
pub fn read_report_summary(dir: &Path) -> Result<ReportSummary, HarnessError> {
    read_json(dir, SUMMARY_FILENAME)
}

/// Read `solutions.json`.
///
/// # Errors
///
/// Same as [`read_report_summary`].
pub fn read_solutions(dir: &Path) -> Result<Vec<SolutionPath>, HarnessError> {
    read_json(dir, SOLUTIONS_FILENAME)
}

/// Read `graph.json`, verified against the summary's digest.
///
/// Returns `Ok(None)` when the summary records no graph.
///
/// # Errors
///
/// Returns [`HarnessError::DigestMismatch`] if the file was altered, and
/// the errors of [`read_report_summary`] otherwise.
pub fn read_graph(dir: &Path) -> Result<Option<GraphExport>, HarnessError> {
    let summary = read_report_summary(dir)?;
    let Some(recorded) = summary.graph_digest else {
        return Ok(None);
    };
    let graph: GraphExport = read_json(dir, GRAPH_FILENAME)?;
    let computed = graph.digest()?;
    if computed.as_str() != recorded {
        return Err(HarnessError::DigestMismatch {
            file: GRAPH_FILENAME.to_string(),
            recorded,
            computed: computed.as_str().to_string(),
        });
    }
    Ok(Some(graph))
}

fn read_json<T: DeserializeOwned>(dir: &Path, filename: &str) -> Result<T, HarnessError> {
    let path = dir.join(filename);
    let bytes = std::fs::read(&path).map_err(|e| HarnessError::io(&path, &e))?;
    debug!(file = filename, bytes = bytes.len(), "report_file_read");
    serde_json::from_slice(&bytes).map_err(|e| HarnessError::parse(filename, &e))
}

/// Write to `.tmp_<name>` in the same directory, then rename into place.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), HarnessError> {
    let dir = path.parent().ok_or_else(|| HarnessError::Io {
        path: path.display().to_string(),
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);
    std::fs::write(&temp_path, content).map_err(|e| HarnessError::io(&temp_path, &e))?;
    std::fs::rename(&temp_path, path).map_err(|e| HarnessError::io(path, &e))
}
