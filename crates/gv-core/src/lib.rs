//! Core reference data for Gravvandrare: abilities, classes, equipment,
//! and name tables.
//!
//! This crate defines the immutable catalogs the generation engine rolls
//! against. Catalogs can be constructed programmatically, taken from the
//! built-in preset in [`preset`], or deserialized from JSON.

/// Ability keys and scores.
pub mod ability;
/// Class definitions and the class catalog.
pub mod class;
/// Carried-load aggregation.
pub mod encumbrance;
/// Error types used throughout the crate.
pub mod error;
/// Equipment items and the item catalog.
pub mod item;
/// Name and biography tables.
pub mod names;
/// The built-in ruleset data.
pub mod preset;

/// Re-export ability types.
pub use ability::{Abilities, AbilityKey, AbilityScore};
/// Re-export class types.
pub use class::{AbilityModifiers, CLASSLESS_NAME, ClassCatalog, ClassDefinition, OriginTable};
/// Re-export load aggregation.
pub use encumbrance::CarriedLoad;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item types.
pub use item::{
    ArmorTier, Encumbrance, EquipmentItem, ItemCatalog, ItemKind, ScrollType, StartingEquipment,
};
/// Re-export name tables.
pub use names::NameTables;
