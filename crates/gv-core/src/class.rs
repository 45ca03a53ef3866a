//! Class definitions and the class catalog.
//!
//! A class is immutable reference data: ability modifiers, starting dice
//! formulas, and the trait/origin tables the generator rolls on. The
//! catalog keeps slot 0 reserved for the "Classless" sentinel so that a
//! random class roll of `1d(N-1)` can index the list directly.

use serde::{Deserialize, Serialize};

use crate::ability::AbilityKey;
use crate::error::{CoreError, CoreResult};

/// Name of the sentinel entry at catalog slot 0.
pub const CLASSLESS_NAME: &str = "Classless";

/// Per-ability modifiers a class applies to the creation rolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityModifiers {
    /// Modifier added to the strength roll.
    #[serde(default)]
    pub strength: i32,
    /// Modifier added to the agility roll.
    #[serde(default)]
    pub agility: i32,
    /// Modifier added to the presence roll.
    #[serde(default)]
    pub presence: i32,
    /// Modifier added to the toughness roll.
    #[serde(default)]
    pub toughness: i32,
}

impl AbilityModifiers {
    /// The modifier for a key.
    pub fn get(&self, key: AbilityKey) -> i32 {
        match key {
            AbilityKey::Strength => self.strength,
            AbilityKey::Agility => self.agility,
            AbilityKey::Presence => self.presence,
            AbilityKey::Toughness => self.toughness,
        }
    }
}

/// An origin table: a short framing text plus the options rolled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginTable {
    /// Framing text shown with the rolled origin.
    pub description: String,
    /// The origins, rolled with `1d(len)`.
    pub options: Vec<String>,
}

/// Immutable definition of a playable class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Class name, unique within a catalog.
    pub name: String,
    /// Ability modifiers applied during creation.
    #[serde(default)]
    pub modifiers: AbilityModifiers,
    /// Dice formula for starting hit points.
    pub hit_point_dice: String,
    /// Which ability score modifies the hit-point roll.
    pub hit_point_ability: AbilityKey,
    /// Dice formula for starting silver.
    pub silver_dice: String,
    /// Multiplier applied to the silver roll.
    pub silver_multiplier: i32,
    /// Dice formula for starting omens.
    pub omens_dice: String,
    /// Dice formula for the starting-weapon table roll.
    pub weapons_dice: String,
    /// Dice formula for the starting-armor roll.
    pub armor_dice: String,
    /// Named class traits rolled on during creation.
    #[serde(default)]
    pub ability_options: Vec<String>,
    /// How many distinct traits a new character receives.
    #[serde(default)]
    pub starting_abilities: u32,
    /// Origin table, for classes that roll a background.
    #[serde(default)]
    pub origins: Option<OriginTable>,
}

impl ClassDefinition {
    /// Whether this definition is the sentinel entry.
    pub fn is_classless(&self) -> bool {
        self.name == CLASSLESS_NAME
    }
}

/// The ordered list of classes, slot 0 reserved for the sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct ClassCatalog {
    classes: Vec<ClassDefinition>,
}

impl ClassCatalog {
    /// Build a catalog, validating the sentinel invariant and each class.
    ///
    /// Slot 0 must be the "Classless" sentinel; every class that grants
    /// starting traits must have at least that many distinct options, or
    /// the trait-selection reroll loop could never finish.
    pub fn new(classes: Vec<ClassDefinition>) -> CoreResult<Self> {
        if !classes.first().is_some_and(ClassDefinition::is_classless) {
            return Err(CoreError::MissingClassless);
        }
        for class in &classes {
            let needed = class.starting_abilities as usize;
            if needed > class.ability_options.len() {
                return Err(CoreError::InvalidClassDefinition {
                    class: class.name.clone(),
                    reason: format!(
                        "grants {needed} traits but only lists {}",
                        class.ability_options.len()
                    ),
                });
            }
            if let Some(origins) = &class.origins
                && origins.options.is_empty()
            {
                return Err(CoreError::InvalidClassDefinition {
                    class: class.name.clone(),
                    reason: "origin table has no options".to_string(),
                });
            }
        }
        Ok(Self { classes })
    }

    /// Load a catalog from a JSON array of class definitions.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let classes: Vec<ClassDefinition> = serde_json::from_str(json)?;
        Self::new(classes)
    }

    /// All classes in catalog order, sentinel first.
    pub fn classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    /// All class names in catalog order.
    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a class by exact name.
    pub fn find(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// The sentinel entry at slot 0.
    pub fn classless(&self) -> &ClassDefinition {
        &self.classes[0]
    }

    /// Number of entries, sentinel included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the catalog has no entries. Never true for a validated
    /// catalog, which always carries the sentinel.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
