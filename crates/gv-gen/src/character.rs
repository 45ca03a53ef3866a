//! The character draft produced by a generation run.

use serde::{Deserialize, Serialize};

use gv_core::Abilities;

/// A replenishable resource with a current and maximum value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Current value.
    pub value: i32,
    /// Maximum value.
    pub max: i32,
}

impl Pool {
    /// Create a pool starting at its maximum.
    pub fn full(max: i32) -> Self {
        Self { value: max, max }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

/// The class-derived attributes of a draft: which class, which rolled
/// traits, and the rolled origin, if the class has an origin table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAttributes {
    /// Class name, resolvable against the catalog the draft was rolled from.
    pub name: String,
    /// Distinct class traits, in the order they were rolled.
    pub abilities: Vec<String>,
    /// Rolled origin, for classes that have one.
    pub origin: Option<String>,
}

/// A complete starting character, handed to the caller at the end of a
/// generation run and never retained by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterDraft {
    /// Rolled name, or `None` when the caller supplies one.
    pub name: Option<String>,
    /// Rolled biography line.
    pub biography: String,
    /// The four ability scores.
    pub abilities: Abilities,
    /// Class, traits, and origin.
    pub class: ClassAttributes,
    /// Hit points. Always at least 1, and full after generation.
    pub health: Pool,
    /// Powers. Full after generation.
    pub powers: Pool,
    /// Omens. Full after generation.
    pub omens: Pool,
    /// Starting silver.
    pub silver: i32,
}
