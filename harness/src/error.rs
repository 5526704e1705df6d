//! Harness errors: everything that can go wrong around a search.

use blocks_kernel::canon::json::CanonError;
use blocks_kernel::domain::state::ValidationError;
use blocks_search::SearchError;

/// Failure loading a problem, running it, or persisting a report.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("I/O error on {path}: {detail}")]
    Io { path: String, detail: String },
    #[error("cannot parse {what}: {detail}")]
    Parse { what: String, detail: String },
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
    /// A persisted report does not match its recorded digest.
    #[error("{file}: digest mismatch (recorded {recorded}, computed {computed})")]
    DigestMismatch {
        file: String,
        recorded: String,
        computed: String,
    },
}

impl From<ValidationError> for HarnessError {
    fn from(e: ValidationError) -> Self {
        Self::Search(SearchError::Validation(e))
    }
}

impl HarnessError {
    pub(crate) fn io(path: &std::path::Path, e: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            detail: e.to_string(),
        }
    }

    pub(crate) fn parse(what: &str, e: &serde_json::Error) -> Self {
        Self::Parse {
            what: what.to_string(),
            detail: e.to_string(),
        }
    }
}
