//! Action generators.
//!
//! Enumeration order is deterministic: by mover id ascending, then target id
//! ascending, with a mover's moves before its orientation actions.

use crate::domain::predicates::{
    can_lie_down, can_receive, can_return_to_support, is_movable, would_create_cycle,
};
use crate::domain::state::BlocksState;
use crate::operators::action::{Action, Direction};

/// Legal actions in the given direction.
#[must_use]
pub fn actions(state: &BlocksState, direction: Direction) -> Vec<Action> {
    match direction {
        Direction::Forward => forward_actions(state),
        Direction::Reverse => reverse_actions(state),
    }
}

/// Forward mode: `Move(o, t)` for every movable `o` and receiving `t != o`;
/// `LayDown(o)` for every `o` that can lie down.
///
/// `LayDown` is emitted even when `o` already lies (an idempotent no-op), and
/// a move onto the current support of `o` is not filtered; callers that want
/// to skip no-op transitions compare canonical keys after application.
#[must_use]
pub fn forward_actions(state: &BlocksState) -> Vec<Action> {
    let mut out = Vec::new();
    for object in state.ids() {
        if is_movable(state, object) {
            for target in state.ids() {
                if target != object && can_receive(state, target) {
                    out.push(Action::Move { object, target });
                }
            }
        }
        if can_lie_down(state, object) {
            out.push(Action::LayDown { object });
        }
    }
    out
}

/// Reverse mode: `MoveTo(o, t)` for every movable `o` whose support could
/// take it back, and every `t` that is neither `o` nor its current support,
/// passes the cycle guard and can receive; `StandUp(o)` for lying eligible
/// objects and `LayDown(o)` for standing eligible objects.
///
/// Every reverse action therefore has a legal forward inverse in the state
/// it produces.
#[must_use]
pub fn reverse_actions(state: &BlocksState) -> Vec<Action> {
    let mut out = Vec::new();
    for object in state.ids() {
        if is_movable(state, object) && can_return_to_support(state, object) {
            let support = state.support_of(object);
            for target in state.ids() {
                if target == object || Some(target) == support {
                    continue;
                }
                if would_create_cycle(state, object, target) {
                    continue;
                }
                if can_receive(state, target) {
                    out.push(Action::MoveTo { object, target });
                }
            }
        }
        if can_lie_down(state, object) {
            if state.is_lying(object) {
                out.push(Action::StandUp { object });
            } else {
                out.push(Action::LayDown { object });
            }
        }
    }
    out
}
