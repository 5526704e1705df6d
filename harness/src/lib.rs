//! Blocks Harness: problem documents in, persisted reports out.
//!
//! The harness runs a problem through one of the search strategies
//! (`load_problem` → `run` → `write_report_dir`) and owns no search logic
//! of its own. Engines live in `blocks_search`; rules live in
//! `blocks_kernel`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod input;
pub mod report_dir;
pub mod runner;

pub use error::HarnessError;
pub use input::{load_problem, parse_problem, ProblemDocument};
pub use report_dir::{
    read_graph, read_report_summary, read_solutions, write_report_dir, ReportSummary,
};
pub use runner::{run, RunReport, Strategy};
