//! The level-up procedure.
//!
//! Level-up produces a delta against an existing character, never a
//! mutation: hit-point growth, a treasure roll, and one drift check per
//! ability. The caller merges the delta into its persisted character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gv_core::{AbilityKey, EquipmentItem, ScrollType};

use crate::character::CharacterDraft;
use crate::error::GenResult;
use crate::generator::CharacterGenerator;
use crate::roller::DieSource;

/// The outcome of one level-up: stat paths with their new values, and any
/// granted items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelUpDelta {
    /// New values keyed by stat path (`health.max`, `abilities.strength`,
    /// `silver`). Only stats that actually changed appear.
    pub stat_changes: BTreeMap<String, i64>,
    /// Items granted by the treasure roll.
    pub new_items: Vec<EquipmentItem>,
}

impl LevelUpDelta {
    /// Whether the level-up changed anything at all.
    pub fn is_empty(&self) -> bool {
        self.stat_changes.is_empty() && self.new_items.is_empty()
    }
}

impl<S: DieSource> CharacterGenerator<'_, S> {
    /// Roll a level-up delta for an existing character.
    ///
    /// Steps run in a fixed order. The ability-drift step reads the
    /// character's original scores, not anything computed earlier in the
    /// same level-up.
    pub fn level_up(&mut self, character: &CharacterDraft) -> GenResult<LevelUpDelta> {
        let mut delta = LevelUpDelta::default();

        // Hit-point growth: 6d10 against the current maximum
        let growth = self
            .roller
            .roll("Hit points", "6d10 against current maximum", "6d10", 0)?;
        if growth > character.health.max {
            let bump = self
                .roller
                .roll("Hit points", "Maximum increases", "1d6", 0)?;
            let new_max = i64::from(character.health.max) + i64::from(bump);
            delta.stat_changes.insert("health.max".to_string(), new_max);
            delta
                .stat_changes
                .insert("health.value".to_string(), new_max);
        } else {
            self.roller
                .note("Hit points", "No growth; the total did not beat the maximum");
        }

        // Treasure: 1d6, with the silver amount rolled once and reused
        let treasure = self.roller.roll("Treasure", "Fortune favors few", "1d6", 0)?;
        match treasure {
            4 => {
                let silver = self.roller.roll("Treasure", "Found silver", "3d10", 0)?;
                delta.stat_changes.insert(
                    "silver".to_string(),
                    i64::from(character.silver) + i64::from(silver),
                );
            }
            5 => {
                if let Some(scroll) = self.treasure_scroll(ScrollType::Unclean)? {
                    delta.new_items.push(scroll);
                }
            }
            6 => {
                if let Some(scroll) = self.treasure_scroll(ScrollType::Sacred)? {
                    delta.new_items.push(scroll);
                }
            }
            _ => {
                self.roller.note("Treasure", "Nothing found");
            }
        }

        // Ability drift: one check per ability against its original value
        for &key in AbilityKey::all() {
            let current = character.abilities.get(key).value;
            let check = self
                .roller
                .roll(drift_name(key), "Drift check against current score", "1d6", 0)?;
            let drifted = if check >= current {
                (current + 1).min(self.config.ability_max)
            } else {
                (current - 1).max(self.config.ability_min)
            };
            if drifted != current {
                delta
                    .stat_changes
                    .insert(format!("abilities.{key}"), i64::from(drifted));
            }
        }

        Ok(delta)
    }

    fn treasure_scroll(&mut self, scroll_type: ScrollType) -> GenResult<Option<EquipmentItem>> {
        let pool = self.items.scrolls(scroll_type);
        if pool.is_empty() {
            self.roller
                .note("Treasure", &format!("no {scroll_type} scrolls in the catalog"));
            return Ok(None);
        }
        let roll = self.roller.roll(
            "Treasure",
            &format!("Random {scroll_type} scroll"),
            &format!("1d{}", pool.len()),
            0,
        )?;
        Ok(usize::try_from(roll - 1)
            .ok()
            .and_then(|index| pool.get(index))
            .map(|item| (*item).clone()))
    }
}

fn drift_name(key: AbilityKey) -> &'static str {
    match key {
        AbilityKey::Strength => "Strength drift",
        AbilityKey::Agility => "Agility drift",
        AbilityKey::Presence => "Presence drift",
        AbilityKey::Toughness => "Toughness drift",
    }
}

#[cfg(test)]
mod tests {
    use gv_core::AbilityScore;
    use gv_core::preset::{doom_classes, doom_items, doom_names};

    use super::*;
    use crate::character::{ClassAttributes, Pool};
    use crate::config::GeneratorConfig;
    use crate::roller::ScriptedSource;

    fn veteran() -> CharacterDraft {
        CharacterDraft {
            class: ClassAttributes {
                name: "Gallows Deserter".to_string(),
                abilities: Vec::new(),
                origin: None,
            },
            health: Pool::full(10),
            silver: 25,
            ..CharacterDraft::default()
        }
    }

    fn generator_with<'a>(
        classes: &'a gv_core::ClassCatalog,
        items: &'a gv_core::ItemCatalog,
        names: &'a gv_core::NameTables,
        script: &[u32],
    ) -> CharacterGenerator<'a, ScriptedSource> {
        CharacterGenerator::with_source(
            classes,
            items,
            names,
            GeneratorConfig::default(),
            ScriptedSource::new(script.iter().copied().collect::<Vec<_>>()),
        )
    }

    #[test]
    fn health_grows_when_the_roll_beats_the_maximum() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        // 6d10 = 15 > 10, then 1d6 = 3; treasure 1d6 = 1; four drift
        // checks of 6 each push every ability from 0 to +1.
        let script = [5, 2, 2, 2, 2, 2, 3, 1, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&veteran()).unwrap();

        assert_eq!(delta.stat_changes["health.max"], 13);
        assert_eq!(delta.stat_changes["health.value"], 13);
        assert_eq!(delta.stat_changes["abilities.strength"], 1);
        assert_eq!(delta.stat_changes["abilities.toughness"], 1);
        assert!(delta.new_items.is_empty());
    }

    #[test]
    fn health_unchanged_when_the_roll_is_low() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        // 6d10 = 6, not above 10; treasure 1; drifts 6 each
        let script = [1, 1, 1, 1, 1, 1, 1, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&veteran()).unwrap();
        assert!(!delta.stat_changes.contains_key("health.max"));
        assert!(!delta.stat_changes.contains_key("health.value"));
    }

    #[test]
    fn treasure_four_grants_silver_rolled_once() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        // growth low; treasure 4; 3d10 = 17; drifts
        let script = [1, 1, 1, 1, 1, 1, 4, 9, 5, 3, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&veteran()).unwrap();
        assert_eq!(delta.stat_changes["silver"], 25 + 17);
        // exactly one 3d10 entry in the transcript
        let silver_rolls = generator
            .roll_log()
            .entries()
            .iter()
            .filter(|e| {
                e.roll
                    .as_ref()
                    .is_some_and(|r| r.formula == "3d10")
            })
            .count();
        assert_eq!(silver_rolls, 1);
    }

    #[test]
    fn treasure_five_and_six_grant_scrolls() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();

        let script = [1, 1, 1, 1, 1, 1, 5, 1, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&veteran()).unwrap();
        assert_eq!(delta.new_items.len(), 1);
        assert_eq!(delta.new_items[0].scroll_type, Some(ScrollType::Unclean));

        let script = [1, 1, 1, 1, 1, 1, 6, 2, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&veteran()).unwrap();
        assert_eq!(delta.new_items[0].scroll_type, Some(ScrollType::Sacred));
        assert_eq!(delta.new_items[0].name, "Unyielding Lantern");
    }

    #[test]
    fn drift_moves_each_ability_both_ways() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        let mut character = veteran();
        character.abilities.strength = AbilityScore::new(2);
        character.abilities.agility = AbilityScore::new(-2);
        // growth low, treasure 1; strength check 1 < 2 -> down to 1;
        // agility check 1 >= -2 -> up to -1; presence 6 >= 0 -> 1;
        // toughness 2 >= 0 -> 1.
        let script = [1, 1, 1, 1, 1, 1, 1, 1, 1, 6, 2];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&character).unwrap();
        assert_eq!(delta.stat_changes["abilities.strength"], 1);
        assert_eq!(delta.stat_changes["abilities.agility"], -1);
        assert_eq!(delta.stat_changes["abilities.presence"], 1);
        assert_eq!(delta.stat_changes["abilities.toughness"], 1);
    }

    #[test]
    fn drift_respects_configured_bounds() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        let mut character = veteran();
        character.abilities.strength = AbilityScore::new(3);
        character.abilities.agility = AbilityScore::new(-3);

        // strength check 6 >= 3 would raise past the cap; agility check
        // 1 < -3 is impossible (1 >= -3), so agility rises instead.
        let script = [1, 1, 1, 1, 1, 1, 1, 6, 1, 1, 1];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&character).unwrap();
        // capped: no entry for strength
        assert!(!delta.stat_changes.contains_key("abilities.strength"));
        assert_eq!(delta.stat_changes["abilities.agility"], -2);

        // an extended variant raises the cap
        let script = [1, 1, 1, 1, 1, 1, 1, 6, 1, 1, 1];
        let mut generator = CharacterGenerator::with_source(
            &classes,
            &items,
            &names,
            GeneratorConfig::default().with_ability_bounds(-3, 6),
            ScriptedSource::new(script),
        );
        let delta = generator.level_up(&character).unwrap();
        assert_eq!(delta.stat_changes["abilities.strength"], 4);
    }

    #[test]
    fn delta_is_empty_when_nothing_changes() {
        let classes = doom_classes();
        let items = doom_items();
        let names = doom_names();
        let mut character = veteran();
        // All abilities at the cap, every drift check high, low growth,
        // no treasure.
        character.abilities.strength = AbilityScore::new(3);
        character.abilities.agility = AbilityScore::new(3);
        character.abilities.presence = AbilityScore::new(3);
        character.abilities.toughness = AbilityScore::new(3);
        let script = [1, 1, 1, 1, 1, 1, 1, 6, 6, 6, 6];
        let mut generator = generator_with(&classes, &items, &names, &script);
        let delta = generator.level_up(&character).unwrap();
        assert!(delta.is_empty());
    }
}
