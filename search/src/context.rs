//! `SearchContext`: the problem and policy every strategy reads.

use blocks_kernel::canon::key::CanonicalKey;
use blocks_kernel::domain::state::{BlocksState, Problem};
use blocks_kernel::operators::action::Direction;

use crate::error::SearchError;
use crate::policy::SearchPolicy;

/// A validated problem paired with a validated policy.
#[derive(Debug, Clone)]
pub struct SearchContext {
    problem: Problem,
    policy: SearchPolicy,
}

impl SearchContext {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
    pub fn new(problem: Problem, policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self { problem, policy })
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Where a search in `direction` starts.
    #[must_use]
    pub fn seed(&self, direction: Direction) -> &BlocksState {
        match direction {
            Direction::Forward => self.problem.start(),
            Direction::Reverse => self.problem.goal(),
        }
    }

    /// What a search in `direction` is looking for.
    #[must_use]
    pub fn target(&self, direction: Direction) -> &BlocksState {
        match direction {
            Direction::Forward => self.problem.goal(),
            Direction::Reverse => self.problem.start(),
        }
    }

    /// Canonical key of [`Self::target`].
    #[must_use]
    pub fn target_key(&self, direction: Direction) -> CanonicalKey {
        CanonicalKey::of(self.target(direction))
    }
}
