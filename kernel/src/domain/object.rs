//! Object identity, catalog entries and external input records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::shape::Shape;

/// Identity of an object. Unique within a state; may be sparse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ObjectId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// The immutable part of an object: what it is, never where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: ObjectId,
    pub name: String,
    pub shape: Shape,
}

/// One object as supplied by (and handed back to) external collaborators.
///
/// `support_id` is `None` only for the table. Extra fields present in source
/// documents (material, weight, opacity) are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub id: ObjectId,
    pub name: String,
    pub shape: Shape,
    #[serde(default)]
    pub support_id: Option<ObjectId>,
    #[serde(default)]
    pub lying: bool,
}

impl ObjectRecord {
    /// A table record (no support).
    #[must_use]
    pub fn table(id: u32, name: &str) -> Self {
        Self {
            id: ObjectId(id),
            name: name.to_string(),
            shape: Shape::Table,
            support_id: None,
            lying: false,
        }
    }

    /// A non-table record resting on `support`, standing.
    #[must_use]
    pub fn on(id: u32, name: &str, shape: Shape, support: u32) -> Self {
        Self {
            id: ObjectId(id),
            name: name.to_string(),
            shape,
            support_id: Some(ObjectId(support)),
            lying: false,
        }
    }

    /// Builder: set the lying flag.
    #[must_use]
    pub fn lying(mut self, lying: bool) -> Self {
        self.lying = lying;
        self
    }
}

/// Read-only view of one object inside a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectView<'a> {
    pub id: ObjectId,
    pub name: &'a str,
    pub shape: Shape,
    pub support: Option<ObjectId>,
    pub lying: bool,
}

impl ObjectView<'_> {
    /// Convert back into an owned input record.
    #[must_use]
    pub fn to_record(&self) -> ObjectRecord {
        ObjectRecord {
            id: self.id,
            name: self.name.to_string(),
            shape: self.shape,
            support_id: self.support,
            lying: self.lying,
        }
    }
}
