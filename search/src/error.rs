//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Every runtime ending
//! (no solution within the bound, budget exhausted, solution cap reached) is
//! a [`crate::outcome::Termination`] inside an `Ok` outcome.

use blocks_kernel::domain::state::ValidationError;

/// Failure before any node is expanded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("cannot start expansion workers: {detail}")]
    WorkerPool { detail: String },
}
