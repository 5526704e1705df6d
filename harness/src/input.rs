//! Problem documents: start and goal object records plus an optional policy.
//!
//! ```json
//! {
//!   "start": [{"id": 0, "name": "Table", "shape": "TABLE"}, ...],
//!   "goal":  [...],
//!   "policy": {"max_depth": 4}
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use blocks_kernel::domain::object::ObjectRecord;
use blocks_kernel::domain::state::Problem;
use blocks_search::{SearchContext, SearchPolicy};

use crate::error::HarnessError;

/// The on-disk problem format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDocument {
    pub start: Vec<ObjectRecord>,
    pub goal: Vec<ObjectRecord>,
    #[serde(default)]
    pub policy: SearchPolicy,
}

impl ProblemDocument {
    /// Validate records and policy into a ready-to-run context.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Search`] for malformed states, mismatched
    /// catalogs or an invalid policy.
    pub fn into_context(self) -> Result<SearchContext, HarnessError> {
        let problem = Problem::from_records(&self.start, &self.goal)?;
        Ok(SearchContext::new(problem, self.policy)?)
    }

    /// The document that describes an existing context.
    #[must_use]
    pub fn from_context(ctx: &SearchContext) -> Self {
        Self {
            start: ctx.problem().start().to_records(),
            goal: ctx.problem().goal().to_records(),
            policy: ctx.policy().clone(),
        }
    }
}

/// Parse and validate a problem document.
///
/// # Errors
///
/// Returns [`HarnessError::Parse`] for malformed JSON, otherwise the
/// validation errors of [`ProblemDocument::into_context`].
pub fn parse_problem(bytes: &[u8]) -> Result<SearchContext, HarnessError> {
    let doc: ProblemDocument =
        serde_json::from_slice(bytes).map_err(|e| HarnessError::parse("problem document", &e))?;
    debug!(
        objects = doc.start.len(),
        max_depth = doc.policy.max_depth,
        "problem_parsed"
    );
    doc.into_context()
}

/// Read, parse and validate a problem document from disk.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_problem`].
pub fn load_problem(path: &Path) -> Result<SearchContext, HarnessError> {
    let bytes = std::fs::read(path).map_err(|e| HarnessError::io(path, &e))?;
    parse_problem(&bytes)
}
