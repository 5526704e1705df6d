//! Object shapes and their wire spellings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Physical shape of an object. Determines the stacking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Shape {
    /// The universal base. Exactly one per state.
    Table,
    /// Has no lying orientation; holds at most one object.
    Cube,
    /// Receives objects only while standing.
    Cylinder,
    /// Donut-shaped; receives objects only while lying.
    Ring,
}

impl Shape {
    /// Canonical upper-case name used in documents and exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Cube => "CUBE",
            Self::Cylinder => "CYLINDER",
            Self::Ring => "RING",
        }
    }

    /// Whether the shape carries a meaningful lying/standing flag.
    #[must_use]
    pub const fn has_orientation(self) -> bool {
        matches!(self, Self::Cylinder | Self::Ring)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized shape name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape: {raw:?}")]
pub struct ParseShapeError {
    pub raw: String,
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    /// Case-insensitive. Also accepts the legacy data spellings
    /// `CYLINDRE` and `DONUT_SAUCISSE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TABLE" => Ok(Self::Table),
            "CUBE" => Ok(Self::Cube),
            "CYLINDER" | "CYLINDRE" => Ok(Self::Cylinder),
            "RING" | "DONUT" | "DONUT_SAUCISSE" => Ok(Self::Ring),
            _ => Err(ParseShapeError { raw: s.to_string() }),
        }
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
