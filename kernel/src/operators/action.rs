//! `Action`: closed set of pure action descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::object::ObjectId;
use crate::domain::state::{BlocksState, Catalog};

/// Which generator an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Start toward goal.
    Forward,
    /// Goal back toward start.
    Reverse,
}

/// A single step. Carries ids only, no state.
///
/// `Move`/`LayDown` are produced by the forward generator;
/// `MoveTo`/`StandUp`/`LayDown` by the reverse generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Move { object: ObjectId, target: ObjectId },
    LayDown { object: ObjectId },
    StandUp { object: ObjectId },
    MoveTo { object: ObjectId, target: ObjectId },
}

impl Action {
    /// The object the action manipulates.
    #[must_use]
    pub const fn object(&self) -> ObjectId {
        match *self {
            Self::Move { object, .. }
            | Self::LayDown { object }
            | Self::StandUp { object }
            | Self::MoveTo { object, .. } => object,
        }
    }

    /// The receiving object, for moves.
    #[must_use]
    pub const fn target(&self) -> Option<ObjectId> {
        match *self {
            Self::Move { target, .. } | Self::MoveTo { target, .. } => Some(target),
            Self::LayDown { .. } | Self::StandUp { .. } => None,
        }
    }

    /// Whether the action relocates its object (as opposed to reorienting it).
    #[must_use]
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::MoveTo { .. })
    }

    /// The generator the action kind belongs to. `LayDown` is also produced
    /// by the reverse generator but reports `Forward`.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self {
            Self::Move { .. } | Self::LayDown { .. } => Direction::Forward,
            Self::MoveTo { .. } | Self::StandUp { .. } => Direction::Reverse,
        }
    }

    /// Stable snake-case tag, as used in exports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::LayDown { .. } => "lay_down",
            Self::StandUp { .. } => "stand_up",
            Self::MoveTo { .. } => "move_to",
        }
    }

    /// Human-readable description using catalog names.
    #[must_use]
    pub fn describe(&self, catalog: &Catalog) -> String {
        match *self {
            Self::Move { object, target } | Self::MoveTo { object, target } => format!(
                "Move {} onto {}",
                catalog.name_of(object),
                catalog.name_of(target)
            ),
            Self::LayDown { object } => format!("Lay down {}", catalog.name_of(object)),
            Self::StandUp { object } => format!("Stand up {}", catalog.name_of(object)),
        }
    }

    /// The action that undoes `self` when applied right after it.
    ///
    /// `before` is the state `self` is applied to. Moves invert to a move
    /// back onto the support the object had in `before`, switching between
    /// the forward and reverse variants; orientation changes invert to each
    /// other. Returns `None` when `before` has no support for the object.
    #[must_use]
    pub fn inverse(&self, before: &BlocksState) -> Option<Self> {
        match *self {
            Self::Move { object, .. } => Some(Self::MoveTo {
                object,
                target: before.support_of(object)?,
            }),
            Self::MoveTo { object, .. } => Some(Self::Move {
                object,
                target: before.support_of(object)?,
            }),
            Self::LayDown { object } => Some(Self::StandUp { object }),
            Self::StandUp { object } => Some(Self::LayDown { object }),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { object, target } => write!(f, "Move({object}, {target})"),
            Self::LayDown { object } => write!(f, "LayDown({object})"),
            Self::StandUp { object } => write!(f, "StandUp({object})"),
            Self::MoveTo { object, target } => write!(f, "MoveTo({object}, {target})"),
        }
    }
}
