//! Blocks Kernel: the deterministic core of the blocks-world solver.
//!
//! # API Surface
//!
//! The kernel exposes three families of entry points:
//!
//! - [`domain::state::BlocksState::from_records`] -- validate object records into a state
//! - [`operators::generate`] -- enumerate legal forward or reverse actions
//! - [`operators::apply::apply`] -- apply one action, producing a new state or a typed failure
//!
//! plus [`canon`] for canonical keys, fingerprints and canonical JSON bytes.
//!
//! # Module Dependency Direction
//!
//! `domain` ← `operators`, `domain` ← `canon`
//!
//! One-way only. `canon` reads states but never constructs them.
//! `domain` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod domain;
pub mod operators;
