//! Starting-equipment allocation.
//!
//! Three gear slots, a weapon, and an armor roll, in that order. Gear
//! tables 2 and 3 each reserve one row that grants a random scroll instead
//! of a gear lookup. A slot whose roll matches no catalog entry resolves
//! to nothing; it never fails the allocation.

use gv_core::{Abilities, EquipmentItem, ItemKind, ScrollType};

use crate::character::CharacterDraft;
use crate::error::GenResult;
use crate::generator::CharacterGenerator;
use crate::roller::DieSource;

/// Roll on gear table 2 that grants a random unclean scroll.
pub const UNCLEAN_SCROLL_SLOT: i32 = 5;
/// Roll on gear table 3 that grants a random sacred scroll.
pub const SACRED_SCROLL_SLOT: i32 = 2;

impl<S: DieSource> CharacterGenerator<'_, S> {
    /// Allocate starting equipment for a finished draft.
    ///
    /// The draft's class resolves against the injected catalog (unknown
    /// classes fall back to the sentinel, as in generation). Unmatched
    /// slots are dropped from the returned list.
    pub fn items(&mut self, draft: &CharacterDraft) -> GenResult<Vec<EquipmentItem>> {
        let class = self
            .classes
            .find(&draft.class.name)
            .unwrap_or_else(|| self.classes.classless());

        let mut allocated: Vec<Option<EquipmentItem>> = Vec::new();

        // Supplies and gear: 1d6 on table 1, then 1d12 on tables 2 and 3
        // with their reserved scroll rows.
        let first = self
            .roller
            .roll("Supplies", "Gear table 1", "1d6", 0)?;
        allocated.push(self.gear_slot(1, first, draft));

        let second = self.roller.roll("Supplies", "Gear table 2", "1d12", 0)?;
        if second == UNCLEAN_SCROLL_SLOT {
            allocated.push(self.random_scroll(ScrollType::Unclean)?);
        } else {
            allocated.push(self.gear_slot(2, second, draft));
        }

        let third = self.roller.roll("Supplies", "Gear table 3", "1d12", 0)?;
        if third == SACRED_SCROLL_SLOT {
            allocated.push(self.random_scroll(ScrollType::Sacred)?);
        } else {
            allocated.push(self.gear_slot(3, third, draft));
        }

        // Weapon: class dice against the weapon table's group 1
        let weapon_roll =
            self.roller
                .roll("Weapon", "Class weapon dice", &class.weapons_dice, 0)?;
        let weapons = self.items.entities(ItemKind::Weapon);
        let weapon = find_starting(&weapons, 1, weapon_roll)
            .map(|item| allocate(item, &draft.abilities));
        if weapon.is_none() {
            self.roller
                .note("Weapon", &format!("no weapon at table row {weapon_roll}"));
        }
        allocated.push(weapon);

        // Armor: direct 1-based index into the full armor list
        let armor_roll = self
            .roller
            .roll("Armor", "Class armor dice", &class.armor_dice, 0)?;
        let armors = self.items.entities(ItemKind::Armor);
        let armor = usize::try_from(armor_roll - 1)
            .ok()
            .and_then(|index| armors.get(index).copied())
            .map(|item| allocate(item, &draft.abilities));
        if armor.is_none() {
            self.roller
                .note("Armor", &format!("no armor at index {armor_roll}"));
        }
        allocated.push(armor);

        Ok(allocated.into_iter().flatten().collect())
    }

    fn gear_slot(&mut self, group: i32, order: i32, draft: &CharacterDraft) -> Option<EquipmentItem> {
        let gear = self.items.entities(ItemKind::Gear);
        let found = find_starting(&gear, group, order).map(|item| allocate(item, &draft.abilities));
        if found.is_none() {
            self.roller.note(
                "Supplies",
                &format!("no gear at table {group} row {order}"),
            );
        }
        found
    }

    fn random_scroll(&mut self, scroll_type: ScrollType) -> GenResult<Option<EquipmentItem>> {
        let pool = self.items.scrolls(scroll_type);
        if pool.is_empty() {
            self.roller
                .note("Scroll", &format!("no {scroll_type} scrolls in the catalog"));
            return Ok(None);
        }
        let name = match scroll_type {
            ScrollType::Unclean => "Unclean scroll",
            ScrollType::Sacred => "Sacred scroll",
        };
        let roll = self
            .roller
            .roll(name, "Random scroll", &format!("1d{}", pool.len()), 0)?;
        Ok(usize::try_from(roll - 1)
            .ok()
            .and_then(|index| pool.get(index))
            .map(|item| (*item).clone()))
    }
}

/// Find the unique item whose starting descriptor matches a group/order pair.
fn find_starting<'i>(
    candidates: &[&'i EquipmentItem],
    group: i32,
    order: i32,
) -> Option<&'i EquipmentItem> {
    candidates
        .iter()
        .copied()
        .find(|item| {
            item.starting
                .is_some_and(|s| s.group == group && s.order == order)
        })
}

/// Clone a catalog item for a draft, applying its quantity rules.
fn allocate(item: &EquipmentItem, abilities: &Abilities) -> EquipmentItem {
    let mut out = item.clone();
    if let Some(starting) = item.starting
        && (starting.quantity.is_some() || starting.mod_ability.is_some())
    {
        let mut quantity = starting.quantity.unwrap_or(item.quantity);
        if let Some(key) = starting.mod_ability {
            quantity += abilities.get(key).value;
        }
        out.quantity = quantity.max(1);
    }
    out
}
