//! The character generator.
//!
//! One generator owns one run: it borrows the catalogs injected at
//! construction, rolls every step in a fixed order through its roller, and
//! hands the finished draft to the caller. The order of rolls is part of
//! the contract; reordering them changes outcomes under a fixed seed.

use gv_core::{Abilities, AbilityKey, ClassCatalog, ClassDefinition, ItemCatalog, NameTables};

use crate::character::{CharacterDraft, ClassAttributes, Pool};
use crate::config::GeneratorConfig;
use crate::error::{GenError, GenResult};
use crate::log::RollLog;
use crate::roller::{DieSource, Roller, SeededSource};

/// Map a 3d6-plus-modifier total onto the ability scale.
///
/// Thresholds follow the ruleset's step table; totals pushed outside the
/// table by large modifiers clamp to the nearest bound.
pub fn map_ability_total(total: i32) -> i32 {
    match total {
        t if t <= 4 => -3,
        t if t <= 6 => -2,
        t if t <= 8 => -1,
        t if t <= 12 => 0,
        t if t <= 14 => 1,
        t if t <= 16 => 2,
        _ => 3,
    }
}

/// Generates starting characters, their equipment, and level-up deltas.
///
/// Catalogs are injected and only read; the generator owns the roller and
/// its transcript. Concurrent runs need separate generators, or their
/// transcripts interleave.
#[derive(Debug)]
pub struct CharacterGenerator<'a, S = SeededSource> {
    pub(crate) classes: &'a ClassCatalog,
    pub(crate) items: &'a ItemCatalog,
    names: &'a NameTables,
    pub(crate) config: GeneratorConfig,
    pub(crate) roller: Roller<S>,
}

impl<'a> CharacterGenerator<'a> {
    /// Create a generator with the default seeded die source.
    pub fn new(
        classes: &'a ClassCatalog,
        items: &'a ItemCatalog,
        names: &'a NameTables,
        config: GeneratorConfig,
    ) -> Self {
        Self::with_source(classes, items, names, config, SeededSource::new(config.seed))
    }
}

impl<'a, S: DieSource> CharacterGenerator<'a, S> {
    /// Create a generator with an explicit die source.
    pub fn with_source(
        classes: &'a ClassCatalog,
        items: &'a ItemCatalog,
        names: &'a NameTables,
        config: GeneratorConfig,
        source: S,
    ) -> Self {
        Self {
            classes,
            items,
            names,
            config,
            roller: Roller::with_source(&config, source),
        }
    }

    /// Generate a complete character draft.
    ///
    /// `selected_class` picks a class by exact name (unknown names fall back
    /// to the Classless sentinel); `None` rolls a random class, never the
    /// sentinel. With `roll_for_name` unset the name is left for the caller.
    ///
    /// Any failure aborts the whole run; no partial draft is returned, but
    /// the transcript up to the failure stays on [`Self::roll_log`].
    pub fn character(
        &mut self,
        selected_class: Option<&str>,
        roll_for_name: bool,
    ) -> GenResult<CharacterDraft> {
        let class = self.resolve_class(selected_class)?;
        let abilities = self.roll_abilities(class)?;
        let powers = self.roll_powers(&abilities)?;
        let omens = self.roll_omens(class)?;
        let name = if roll_for_name {
            Some(self.roll_name()?)
        } else {
            None
        };
        let biography = self.roll_biography()?;
        let class_attributes = self.roll_class_attributes(class)?;
        let health = self.roll_hit_points(class, &abilities)?;
        let silver = self.roll_silver(class)?;

        Ok(CharacterDraft {
            name,
            biography,
            abilities,
            class: class_attributes,
            health,
            powers,
            omens,
            silver,
        })
    }

    /// The transcript accumulated so far. Preserved across failures.
    pub fn roll_log(&self) -> &RollLog {
        self.roller.log()
    }

    /// Consume the generator, keeping only its transcript.
    pub fn into_roll_log(self) -> RollLog {
        self.roller.into_log()
    }

    /// Reroll a character's omens from its class dice, returning the new
    /// full pool. Confirmation flows belong to the host.
    pub fn reroll_omens(&mut self, class_name: &str) -> GenResult<Pool> {
        let class = self
            .classes
            .find(class_name)
            .unwrap_or_else(|| self.classes.classless());
        let total = self
            .roller
            .roll("Omens", "Rerolled class omens", &class.omens_dice, 0)?;
        Ok(Pool::full(total))
    }

    /// Reroll a character's powers from 1d4 plus presence, returning the
    /// new full pool.
    pub fn reroll_powers(&mut self, abilities: &Abilities) -> GenResult<Pool> {
        let total = self.roller.roll(
            "Powers",
            "Rerolled powers, 1d4 plus presence",
            "1d4",
            abilities.presence.value,
        )?;
        Ok(Pool::full(total.max(0)))
    }

    fn resolve_class(&mut self, selected: Option<&str>) -> GenResult<&'a ClassDefinition> {
        match selected {
            Some(name) => {
                let class = match self.classes.find(name) {
                    Some(class) => {
                        self.roller
                            .note("Class", &format!("{} (chosen)", class.name));
                        class
                    }
                    None => {
                        let fallback = self.classes.classless();
                        self.roller.note(
                            "Class",
                            &format!("\"{name}\" not in the catalog, falling back to {}", fallback.name),
                        );
                        fallback
                    }
                };
                Ok(class)
            }
            None => {
                // 1d(N-1) over a catalog whose slot 0 is the excluded
                // sentinel indexes the playable entries directly.
                let sides = self.classes.len().saturating_sub(1);
                if sides == 0 {
                    return Err(GenError::EmptyCatalog("playable classes"));
                }
                let roll = self.roller.roll(
                    "Class",
                    "Random class from the catalog",
                    &format!("1d{sides}"),
                    0,
                )?;
                let index = usize::try_from(roll).map_err(|_| GenError::TableMiss {
                    table: "classes",
                    index: roll,
                })?;
                self.classes
                    .classes()
                    .get(index)
                    .ok_or(GenError::TableMiss {
                        table: "classes",
                        index: roll,
                    })
            }
        }
    }

    fn roll_abilities(&mut self, class: &ClassDefinition) -> GenResult<Abilities> {
        let mut abilities = Abilities::default();
        for &key in AbilityKey::all() {
            let modifier = class.modifiers.get(key);
            let total = self
                .roller
                .roll(title(key), "3d6 plus class modifier", "3d6", modifier)?;
            abilities.get_mut(key).value = map_ability_total(total);
        }
        Ok(abilities)
    }

    fn roll_powers(&mut self, abilities: &Abilities) -> GenResult<Pool> {
        let total = self.roller.roll(
            "Powers",
            "1d4 plus presence",
            "1d4",
            abilities.presence.value,
        )?;
        Ok(Pool::full(total.max(0)))
    }

    fn roll_omens(&mut self, class: &ClassDefinition) -> GenResult<Pool> {
        let total = self
            .roller
            .roll("Omens", "Class omens dice", &class.omens_dice, 0)?;
        Ok(Pool::full(total))
    }

    fn roll_name(&mut self) -> GenResult<String> {
        let row = self.roller.roll("Name", "Name table row", "1d6", 0)?;
        let column = self.roller.roll("Name", "Name table column", "1d8", 0)?;
        let name = self
            .names
            .name(row, column)
            .ok_or(GenError::TableMiss {
                table: "names",
                index: column,
            })?
            .to_string();
        self.roller.note("Name", &name);
        Ok(name)
    }

    fn roll_biography(&mut self) -> GenResult<String> {
        let first = self
            .roller
            .roll("Trait", "First personality trait", "1d20", 0)?;
        let second =
            self.roller
                .roll_excluding("Trait", "Second personality trait", "1d20", 0, first)?;
        let body = self.roller.roll("Body", "Body description", "1d20", 0)?;
        let habit = self.roller.roll("Habit", "Habit", "1d20", 0)?;

        let first_text = self.personality(first)?;
        let second_text = self.personality(second)?.to_lowercase();
        let body_text = self.lookup_body(body)?;
        let habit_text = self.lookup_habit(habit)?;

        Ok(format!("{first_text} och {second_text}. {body_text} {habit_text}"))
    }

    fn personality(&self, index: i32) -> GenResult<&'a str> {
        self.names.personality(index).ok_or(GenError::TableMiss {
            table: "traits",
            index,
        })
    }

    fn lookup_body(&self, index: i32) -> GenResult<&'a str> {
        self.names.body(index).ok_or(GenError::TableMiss {
            table: "bodies",
            index,
        })
    }

    fn lookup_habit(&self, index: i32) -> GenResult<&'a str> {
        self.names.habit(index).ok_or(GenError::TableMiss {
            table: "habits",
            index,
        })
    }

    fn roll_class_attributes(&mut self, class: &ClassDefinition) -> GenResult<ClassAttributes> {
        let mut picked: Vec<String> = Vec::new();
        let needed = class.starting_abilities;

        if needed > 0 {
            let distinct = class
                .ability_options
                .iter()
                .collect::<std::collections::HashSet<_>>()
                .len();
            if needed as usize > distinct {
                return Err(GenError::InsufficientOptions {
                    class: class.name.clone(),
                    needed,
                    available: distinct,
                });
            }

            let formula = format!("1d{}", class.ability_options.len());
            let mut attempts = 0u32;
            while (picked.len() as u32) < needed {
                if attempts >= self.config.max_rerolls {
                    return Err(GenError::TraitSelectionStalled {
                        class: class.name.clone(),
                        attempts,
                    });
                }
                attempts += 1;
                let roll = self
                    .roller
                    .roll("Class trait", "Trait from the class table", &formula, 0)?;
                let option = class
                    .ability_options
                    .get(usize::try_from(roll - 1).unwrap_or(usize::MAX))
                    .ok_or(GenError::TableMiss {
                        table: "class traits",
                        index: roll,
                    })?;
                // A duplicate is discarded without consuming a slot
                if picked.iter().any(|p| p == option) {
                    continue;
                }
                picked.push(option.clone());
            }
        }

        let origin = match &class.origins {
            Some(origins) => {
                let roll = self.roller.roll(
                    "Origin",
                    &origins.description,
                    &format!("1d{}", origins.options.len()),
                    0,
                )?;
                let text = origins
                    .options
                    .get(usize::try_from(roll - 1).unwrap_or(usize::MAX))
                    .ok_or(GenError::TableMiss {
                        table: "origins",
                        index: roll,
                    })?;
                Some(text.clone())
            }
            None => None,
        };

        Ok(ClassAttributes {
            name: class.name.clone(),
            abilities: picked,
            origin,
        })
    }

    fn roll_hit_points(
        &mut self,
        class: &ClassDefinition,
        abilities: &Abilities,
    ) -> GenResult<Pool> {
        let score = abilities.get(class.hit_point_ability).value;
        let total = self.roller.roll(
            "Hit points",
            &format!("Class dice plus {}", class.hit_point_ability),
            &class.hit_point_dice,
            score,
        )?;
        Ok(Pool::full(total.max(1)))
    }

    fn roll_silver(&mut self, class: &ClassDefinition) -> GenResult<i32> {
        let roll = self
            .roller
            .roll("Silver", "Class silver dice", &class.silver_dice, 0)?;
        Ok(roll * class.silver_multiplier)
    }
}

fn title(key: AbilityKey) -> &'static str {
    match key {
        AbilityKey::Strength => "Strength",
        AbilityKey::Agility => "Agility",
        AbilityKey::Presence => "Presence",
        AbilityKey::Toughness => "Toughness",
    }
}
