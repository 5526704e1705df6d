//! The legality predicates. Single source of truth for every action check.
//!
//! Generators and the transition function both route through these
//! functions; no other module inspects shapes or loads to decide legality.

use crate::domain::object::ObjectId;
use crate::domain::shape::Shape;
use crate::domain::state::BlocksState;

/// Not the table, and nothing rests on it.
#[must_use]
pub fn is_movable(state: &BlocksState, id: ObjectId) -> bool {
    match state.shape_of(id) {
        None | Some(Shape::Table) => false,
        Some(_) => state.load_of(id) == 0,
    }
}

/// Movable and has a lying orientation (cubes do not).
///
/// Also gates standing back up: orientation changes in either direction
/// require the same eligibility.
#[must_use]
pub fn can_lie_down(state: &BlocksState, id: ObjectId) -> bool {
    is_movable(state, id) && state.shape_of(id) != Some(Shape::Cube)
}

/// Whether `id` can currently have another object placed on it.
///
/// - TABLE: always.
/// - CYLINDER: only while standing.
/// - RING: only while lying.
/// - CUBE: only while empty.
#[must_use]
pub fn can_receive(state: &BlocksState, id: ObjectId) -> bool {
    match state.shape_of(id) {
        Some(Shape::Table) => true,
        Some(Shape::Cylinder) => !state.is_lying(id),
        Some(Shape::Ring) => state.is_lying(id),
        Some(Shape::Cube) => state.load_of(id) == 0,
        None => false,
    }
}

/// Whether the current support of `id` could receive `id` back once `id`
/// has left it. Reverse moves are only sound when this holds: the forward
/// step they stand for is `Move(id, support)`.
///
/// A cube support must carry nothing but `id`; other shapes keep their
/// orientation, so [`can_receive`] decides.
#[must_use]
pub fn can_return_to_support(state: &BlocksState, id: ObjectId) -> bool {
    let Some(support) = state.support_of(id) else {
        return false;
    };
    match state.shape_of(support) {
        Some(Shape::Cube) => state.load_of(support) == 1,
        _ => can_receive(state, support),
    }
}

/// Cycle guard: whether resting `object` on `target` would close a loop,
/// i.e. `target` is `object` or `object` appears in `target`'s support chain.
#[must_use]
pub fn would_create_cycle(state: &BlocksState, object: ObjectId, target: ObjectId) -> bool {
    target == object || state.support_chain(target).contains(&object)
}
