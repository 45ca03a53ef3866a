//! Carried-load aggregation.
//!
//! Bulk is measured in soaps, stones, and sacks: 100 soaps make a stone,
//! 10 stones make a sack. A character is encumbered above 10 inventory
//! slots and over-encumbered above 20.

use serde::{Deserialize, Serialize};

use crate::item::EquipmentItem;

/// Slots above which a character is encumbered.
pub const ENCUMBERED_SLOTS: u32 = 10;
/// Slots above which a character is over-encumbered.
pub const OVER_ENCUMBERED_SLOTS: u32 = 20;

/// The total bulk of a set of carried items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedLoad {
    /// Whole sacks carried, after carry-over from stones.
    pub sacks: u32,
    /// Loose stones carried, after carry-over from soaps.
    pub stones: u32,
    /// Loose soaps carried.
    pub soaps: u32,
    /// Inventory slots in use.
    pub slots_used: u32,
}

impl CarriedLoad {
    /// Tally the bulk of a set of items.
    ///
    /// Soaps carry into stones at 100 and stones into sacks at 10. Slot
    /// use counts stones (after soap carry-over) plus ten per sack, with
    /// one extra slot once more than a single loose soap is carried.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a EquipmentItem>) -> Self {
        let mut sacks = 0u32;
        let mut stones = 0u32;
        let mut soaps = 0u32;

        for item in items {
            sacks += item.encumbrance.sacks;
            stones += item.encumbrance.stones;
            soaps += item.encumbrance.soaps;
        }

        let loose_soaps = soaps % 100;
        stones += soaps / 100;
        let loose_stones = stones % 10;
        let total_sacks = sacks + stones / 10;

        let mut slots_used = stones + sacks * 10;
        if loose_soaps > 1 {
            slots_used += 1;
        }

        Self {
            sacks: total_sacks,
            stones: loose_stones,
            soaps: loose_soaps,
            slots_used,
        }
    }

    /// Whether the load slows the character down.
    pub fn encumbered(&self) -> bool {
        self.slots_used > ENCUMBERED_SLOTS
    }

    /// Whether the load is too heavy to travel with.
    pub fn over_encumbered(&self) -> bool {
        self.slots_used > OVER_ENCUMBERED_SLOTS
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::item::{Encumbrance, ItemKind};

    fn item(sacks: u32, stones: u32, soaps: u32) -> EquipmentItem {
        EquipmentItem {
            name: "test".to_string(),
            kind: ItemKind::Gear,
            scroll_type: None,
            starting: None,
            quantity: 1,
            silver: 0,
            encumbrance: Encumbrance {
                sacks,
                stones,
                soaps,
            },
            damage_dice: None,
            armor_tier: None,
            usage_die: None,
        }
    }

    #[test]
    fn empty_load() {
        let load = CarriedLoad::tally(std::iter::empty::<&EquipmentItem>());
        assert_eq!(load, CarriedLoad::default());
        assert!(!load.encumbered());
    }

    #[test]
    fn soaps_carry_into_stones() {
        let items = [item(0, 0, 250)];
        let load = CarriedLoad::tally(&items);
        assert_eq!(load.soaps, 50);
        assert_eq!(load.stones, 2);
        // 2 stones + 1 slot for the loose soaps
        assert_eq!(load.slots_used, 3);
    }

    #[test]
    fn stones_carry_into_sacks() {
        let items = [item(0, 12, 0)];
        let load = CarriedLoad::tally(&items);
        assert_eq!(load.sacks, 1);
        assert_eq!(load.stones, 2);
        assert_eq!(load.slots_used, 12);
        assert!(load.encumbered());
        assert!(!load.over_encumbered());
    }

    #[test]
    fn single_loose_soap_is_free() {
        let items = [item(0, 1, 1)];
        let load = CarriedLoad::tally(&items);
        assert_eq!(load.slots_used, 1);
        let items = [item(0, 1, 2)];
        let load = CarriedLoad::tally(&items);
        assert_eq!(load.slots_used, 2);
    }

    #[test]
    fn over_encumbered_threshold() {
        let items = [item(2, 1, 0)];
        let load = CarriedLoad::tally(&items);
        assert_eq!(load.slots_used, 21);
        assert!(load.over_encumbered());
    }

    proptest! {
        #[test]
        fn loose_units_stay_below_carry(
            sacks in 0u32..4,
            stones in 0u32..40,
            soaps in 0u32..400,
        ) {
            let items = [item(sacks, stones, soaps)];
            let load = CarriedLoad::tally(&items);
            prop_assert!(load.soaps < 100);
            prop_assert!(load.stones < 10);
        }

        #[test]
        fn slots_monotonic_in_stones(stones in 0u32..40) {
            let lighter = [item(0, stones, 0)];
            let heavier = [item(0, stones + 1, 0)];
            prop_assert!(
                CarriedLoad::tally(&heavier).slots_used
                    >= CarriedLoad::tally(&lighter).slots_used
            );
        }
    }
}
