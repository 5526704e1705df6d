//! Canonical forms: state keys, content hashes, canonical JSON bytes.
//!
//! Depends on `domain`. Nothing else in the kernel depends on `canon`.

pub mod hash;
pub mod json;
pub mod key;
