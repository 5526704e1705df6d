//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256. Rendering: `"sha256:<lowercase hex>"`.
//! Every hashed payload is prefixed with a null-terminated domain tag so
//! that equal bytes in different roles never collide.

use std::fmt;

use sha2::{Digest, Sha256};

/// Domain prefix for state fingerprints (canonical key encoding).
pub const DOMAIN_STATE_KEY: &[u8] = b"BLOCKS::STATE_KEY::V1\0";

/// Domain prefix for exported graph documents.
pub const DOMAIN_GRAPH_EXPORT: &[u8] = b"BLOCKS::GRAPH_EXPORT::V1\0";

/// A content-addressed hash with its algorithm tag.
///
/// Invariant: exactly one `:` separator with non-empty parts on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse `"algorithm:hex"`. `None` on a missing or edge colon.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon + 1 == s.len() || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 of `domain || data`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let hex = hex::encode(hasher.finalize());
    ContentHash {
        colon: "sha256".len(),
        full: format!("sha256:{hex}"),
    }
}
