//! Object catalog, placements and the legality predicates.

pub mod object;
pub mod predicates;
pub mod shape;
pub mod state;
