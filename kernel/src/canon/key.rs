//! `CanonicalKey`: the identity of a state for deduplication.
//!
//! Two states are equal iff their keys are equal. The key covers every
//! object, the table included, so it is valid for both search directions.

use std::fmt;

use crate::canon::hash::{canonical_hash, ContentHash, DOMAIN_STATE_KEY};
use crate::domain::object::ObjectId;
use crate::domain::state::BlocksState;

/// Id-sorted `(id, support, lying)` triples.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalKey(Vec<(ObjectId, Option<ObjectId>, bool)>);

impl CanonicalKey {
    /// Build the key of a state.
    #[must_use]
    pub fn of(state: &BlocksState) -> Self {
        Self(
            state
                .objects()
                .map(|o| (o.id, o.support, o.lying))
                .collect(),
        )
    }

    /// The triples, ascending by id.
    #[must_use]
    pub fn entries(&self) -> &[(ObjectId, Option<ObjectId>, bool)] {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    /// `id:support:lying|...`, support `-` for the table, lying `0`/`1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (id, support, lying)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            match support {
                Some(s) => write!(f, "{id}:{s}:{}", u8::from(*lying))?,
                None => write!(f, "{id}:-:{}", u8::from(*lying))?,
            }
        }
        Ok(())
    }
}

/// SHA-256 fingerprint of a state's canonical key.
#[must_use]
pub fn state_fingerprint(state: &BlocksState) -> ContentHash {
    canonical_hash(DOMAIN_STATE_KEY, CanonicalKey::of(state).to_string().as_bytes())
}
