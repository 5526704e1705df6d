//! `apply()`: apply an action to a `BlocksState`, producing a new state.
//!
//! The single entry point for state change. Works on a copy and never
//! trusts the caller's earlier legality check:
//! 1. Precondition check against the input state, via the shared predicates.
//! 2. Effect on the copy.
//! 3. Post-apply validation: the effect must touch only the acting object,
//!    and only the field the action kind declares.

use crate::domain::object::ObjectId;
use crate::domain::predicates::{can_lie_down, can_receive, is_movable, would_create_cycle};
use crate::domain::state::BlocksState;
use crate::operators::action::Action;

/// Typed failure for action application. Fail-closed: the input state is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyFailure {
    #[error("object {id} is not in the state")]
    UnknownObject { id: ObjectId },
    #[error("object {object} cannot be placed on itself")]
    SelfTarget { object: ObjectId },
    #[error("object {object} cannot be lifted")]
    NotMovable { object: ObjectId },
    #[error("object {target} cannot receive another object")]
    CannotReceive { target: ObjectId },
    #[error("placing {object} on {target} would close a support cycle")]
    WouldCreateCycle { object: ObjectId, target: ObjectId },
    #[error("object {object} has no orientation to change")]
    NotOrientable { object: ObjectId },
    /// The effect touched more than the declared field. A logic defect.
    #[error("effect contract violated: {detail}")]
    EffectContractViolation { detail: String },
}

/// A successful application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: BlocksState,
    pub description: String,
}

/// Result type for apply.
pub type ApplyResult = Result<Transition, ApplyFailure>;

/// Apply `action` to `state`.
///
/// Moves set the object's support to the target. `LayDown` and `StandUp`
/// set the lying flag; both succeed unchanged when the object is already in
/// the requested orientation.
///
/// # Errors
///
/// Returns [`ApplyFailure`] when an id is unknown, the mover is covered or
/// is the table, the target cannot receive, the move would close a cycle,
/// or the object has no orientation (cube or table).
pub fn apply(state: &BlocksState, action: &Action) -> ApplyResult {
    let object = action.object();
    if !state.contains(object) {
        return Err(ApplyFailure::UnknownObject { id: object });
    }

    let mut next = state.clone();
    match *action {
        Action::Move { target, .. } | Action::MoveTo { target, .. } => {
            check_move(state, object, target)?;
            next.set_support(object, target);
        }
        Action::LayDown { .. } => {
            check_orientable(state, object)?;
            next.set_lying(object, true);
        }
        Action::StandUp { .. } => {
            check_orientable(state, object)?;
            next.set_lying(object, false);
        }
    }

    validate_effect(state, &next, action)?;

    Ok(Transition {
        description: action.describe(state.catalog()),
        state: next,
    })
}

fn check_move(state: &BlocksState, object: ObjectId, target: ObjectId) -> Result<(), ApplyFailure> {
    if !state.contains(target) {
        return Err(ApplyFailure::UnknownObject { id: target });
    }
    if target == object {
        return Err(ApplyFailure::SelfTarget { object });
    }
    if !is_movable(state, object) {
        return Err(ApplyFailure::NotMovable { object });
    }
    if would_create_cycle(state, object, target) {
        return Err(ApplyFailure::WouldCreateCycle { object, target });
    }
    if !can_receive(state, target) {
        return Err(ApplyFailure::CannotReceive { target });
    }
    Ok(())
}

fn check_orientable(state: &BlocksState, object: ObjectId) -> Result<(), ApplyFailure> {
    if can_lie_down(state, object) {
        return Ok(());
    }
    if is_movable(state, object) {
        Err(ApplyFailure::NotOrientable { object })
    } else {
        Err(ApplyFailure::NotMovable { object })
    }
}

/// Compare the two states object by object.
fn validate_effect(
    before: &BlocksState,
    after: &BlocksState,
    action: &Action,
) -> Result<(), ApplyFailure> {
    let acting = action.object();
    for (old, new) in before.objects().zip(after.objects()) {
        if old.id != acting {
            if old != new {
                return Err(ApplyFailure::EffectContractViolation {
                    detail: format!("{action} changed bystander {}", old.id),
                });
            }
            continue;
        }
        let support_changed = old.support != new.support;
        let lying_changed = old.lying != new.lying;
        let ok = if action.is_move() {
            !lying_changed && new.support == action.target()
        } else {
            !support_changed
        };
        if !ok {
            return Err(ApplyFailure::EffectContractViolation {
                detail: format!(
                    "{action}: support {:?} -> {:?}, lying {} -> {}",
                    old.support, new.support, old.lying, new.lying
                ),
            });
        }
    }
    Ok(())
}
