//! Equipment items and the item catalog.
//!
//! Items eligible for automatic starting-equipment allocation carry a
//! [`StartingEquipment`] descriptor whose `(group, order)` pair identifies
//! which random table the item sits on and which row selects it.

use serde::{Deserialize, Serialize};

use crate::ability::AbilityKey;
use crate::error::{CoreError, CoreResult};

/// The broad categories of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Supplies and general gear.
    Gear,
    /// Weapons.
    Weapon,
    /// Armor.
    Armor,
    /// Scrolls, unclean or sacred.
    Scroll,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gear => write!(f, "gear"),
            Self::Weapon => write!(f, "weapon"),
            Self::Armor => write!(f, "armor"),
            Self::Scroll => write!(f, "scroll"),
        }
    }
}

/// The two kinds of scroll the ruleset knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollType {
    /// Profane magic. Anyone may read it; nothing good follows.
    Unclean,
    /// Consecrated magic, for those who still pray.
    Sacred,
}

impl std::fmt::Display for ScrollType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unclean => write!(f, "unclean"),
            Self::Sacred => write!(f, "sacred"),
        }
    }
}

/// Starting-equipment descriptor: which table an item is on and which
/// roll selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingEquipment {
    /// Which equipment table the item belongs to.
    pub group: i32,
    /// The table row that selects this item.
    pub order: i32,
    /// Fixed quantity granted when the item is allocated.
    #[serde(default)]
    pub quantity: Option<i32>,
    /// Ability whose score is added to the granted quantity.
    #[serde(default)]
    pub mod_ability: Option<AbilityKey>,
}

/// An item's bulk, in the ruleset's carry units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encumbrance {
    /// Sacks (1 sack = 10 stones).
    #[serde(default)]
    pub sacks: u32,
    /// Stones (1 stone = 100 soaps).
    #[serde(default)]
    pub stones: u32,
    /// Soaps, the smallest unit.
    #[serde(default)]
    pub soaps: u32,
}

/// An armor item's protection tier, 0 (rags) to 3 (full plate).
///
/// `value` is the current tier; armor degrades in play, so `max` records
/// the tier it can be repaired back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorTier {
    /// Current tier.
    pub value: u8,
    /// Best tier this armor can hold.
    pub max: u8,
}

impl ArmorTier {
    /// Create a tier at its maximum.
    pub fn new(tier: u8) -> Self {
        Self {
            value: tier,
            max: tier,
        }
    }

    /// Damage-reduction dice for the current tier.
    pub fn damage_reduction(&self) -> &'static str {
        match self.value {
            0 => "-1",
            1 => "-1d2",
            2 => "-1d4",
            3 => "-1d6",
            _ => "0",
        }
    }

    /// Agility-test penalty imposed by the current tier, if any.
    pub fn agility_penalty(&self) -> Option<i32> {
        match self.value {
            2 => Some(2),
            3 => Some(4),
            _ => None,
        }
    }

    /// Defence-test penalty imposed by the current tier, if any.
    pub fn defence_penalty(&self) -> Option<i32> {
        match self.value {
            2 | 3 => Some(2),
            _ => None,
        }
    }
}

fn default_quantity() -> i32 {
    1
}

/// A catalog entry for a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    /// Display name.
    pub name: String,
    /// Equipment category.
    pub kind: ItemKind,
    /// Scroll type, for scroll items.
    #[serde(default)]
    pub scroll_type: Option<ScrollType>,
    /// Starting-equipment descriptor; items without one are never
    /// allocated automatically.
    #[serde(default)]
    pub starting: Option<StartingEquipment>,
    /// Carried quantity.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Value in silver.
    #[serde(default)]
    pub silver: i32,
    /// Bulk of one unit.
    #[serde(default)]
    pub encumbrance: Encumbrance,
    /// Damage dice, for weapons.
    #[serde(default)]
    pub damage_dice: Option<String>,
    /// Protection tier, for armor.
    #[serde(default)]
    pub armor_tier: Option<ArmorTier>,
    /// Usage die, for consumables that deplete.
    #[serde(default)]
    pub usage_die: Option<String>,
}

/// A filterable collection of equipment items.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemCatalog {
    items: Vec<EquipmentItem>,
}

impl ItemCatalog {
    /// Build a catalog, validating that every scroll carries a scroll type.
    pub fn new(items: Vec<EquipmentItem>) -> CoreResult<Self> {
        for item in &items {
            if item.kind == ItemKind::Scroll && item.scroll_type.is_none() {
                return Err(CoreError::MissingScrollType(item.name.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a JSON array of items.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let items: Vec<EquipmentItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// All items of a kind, in catalog order.
    pub fn entities(&self, kind: ItemKind) -> Vec<&EquipmentItem> {
        self.items.iter().filter(|i| i.kind == kind).collect()
    }

    /// All scrolls of a type, in catalog order.
    pub fn scrolls(&self, scroll_type: ScrollType) -> Vec<&EquipmentItem> {
        self.items
            .iter()
            .filter(|i| i.kind == ItemKind::Scroll && i.scroll_type == Some(scroll_type))
            .collect()
    }

    /// All items.
    pub fn all(&self) -> &[EquipmentItem] {
        &self.items
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
