//! The built-in "doom" ruleset: classes, equipment tables, and name tables.
//!
//! These produce the same catalogs that the equivalent JSON data files
//! would, but without requiring any files on disk. Campaigns that want
//! their own tables load them with the `from_json` constructors instead.

use crate::ability::AbilityKey;
use crate::class::{AbilityModifiers, CLASSLESS_NAME, ClassCatalog, ClassDefinition, OriginTable};
use crate::item::{
    ArmorTier, Encumbrance, EquipmentItem, ItemCatalog, ItemKind, ScrollType, StartingEquipment,
};
use crate::names::NameTables;

/// The built-in class catalog: the Classless sentinel and four classes.
pub fn doom_classes() -> ClassCatalog {
    let classes = vec![
        ClassDefinition {
            name: CLASSLESS_NAME.to_string(),
            modifiers: AbilityModifiers::default(),
            hit_point_dice: "1d8".to_string(),
            hit_point_ability: AbilityKey::Toughness,
            silver_dice: "2d6".to_string(),
            silver_multiplier: 10,
            omens_dice: "1d2".to_string(),
            weapons_dice: "1d10".to_string(),
            armor_dice: "1d2".to_string(),
            ability_options: Vec::new(),
            starting_abilities: 0,
            origins: None,
        },
        ClassDefinition {
            name: "Gallows Deserter".to_string(),
            modifiers: AbilityModifiers {
                strength: 1,
                agility: 0,
                presence: -1,
                toughness: 1,
            },
            hit_point_dice: "1d8".to_string(),
            hit_point_ability: AbilityKey::Toughness,
            silver_dice: "1d6".to_string(),
            silver_multiplier: 10,
            omens_dice: "1d2".to_string(),
            weapons_dice: "1d10".to_string(),
            armor_dice: "1d4".to_string(),
            ability_options: vec![
                "Shield-splitter".to_string(),
                "Night watchman".to_string(),
                "Powder burns".to_string(),
                "Old drill scars".to_string(),
                "Loots the fallen".to_string(),
                "Sleeps in armor".to_string(),
            ],
            starting_abilities: 1,
            origins: Some(OriginTable {
                description: "You fled the rope. What did they say you did?".to_string(),
                options: vec![
                    "Struck an officer who deserved worse".to_string(),
                    "Sold the company's rations".to_string(),
                    "Refused to burn the village".to_string(),
                    "Lost the banner in a bog".to_string(),
                    "Woke beside a dead sergeant".to_string(),
                    "Nothing. The rope just wanted you".to_string(),
                ],
            }),
        },
        ClassDefinition {
            name: "Grave Robber".to_string(),
            modifiers: AbilityModifiers {
                strength: -1,
                agility: 2,
                presence: 0,
                toughness: 0,
            },
            hit_point_dice: "1d6".to_string(),
            hit_point_ability: AbilityKey::Agility,
            silver_dice: "3d6".to_string(),
            silver_multiplier: 10,
            omens_dice: "1d2".to_string(),
            weapons_dice: "1d6".to_string(),
            armor_dice: "1d2".to_string(),
            ability_options: vec![
                "Knows the old crypt roads".to_string(),
                "Quick over walls".to_string(),
                "Reads grave-marks".to_string(),
                "Smells rot before it shows".to_string(),
                "Steady hands in the dark".to_string(),
                "Keeps a dog's loyalty".to_string(),
            ],
            starting_abilities: 2,
            origins: None,
        },
        ClassDefinition {
            name: "Heretic Priest".to_string(),
            modifiers: AbilityModifiers {
                strength: 0,
                agility: -1,
                presence: 2,
                toughness: 0,
            },
            hit_point_dice: "1d6".to_string(),
            hit_point_ability: AbilityKey::Toughness,
            silver_dice: "2d6".to_string(),
            silver_multiplier: 10,
            omens_dice: "1d4".to_string(),
            weapons_dice: "1d6".to_string(),
            armor_dice: "1d3".to_string(),
            ability_options: vec![
                "Unshakable liturgy".to_string(),
                "Anoints weapons with ash".to_string(),
                "Hears the basilisk sleeping".to_string(),
                "Keeps relics sewn in the hem".to_string(),
                "Blessed once, by accident".to_string(),
                "Preaches to the unlistening dead".to_string(),
            ],
            starting_abilities: 1,
            origins: Some(OriginTable {
                description: "Your church cast you out for".to_string(),
                options: vec![
                    "Translating the forbidden psalm".to_string(),
                    "Baptizing the drowned".to_string(),
                    "Doubting aloud at the wrong funeral".to_string(),
                    "Selling absolution twice".to_string(),
                    "Loving the wrong saint".to_string(),
                    "Burning the tithe records".to_string(),
                ],
            }),
        },
        ClassDefinition {
            name: "Pale Hermit".to_string(),
            modifiers: AbilityModifiers {
                strength: -1,
                agility: 0,
                presence: 1,
                toughness: -1,
            },
            hit_point_dice: "1d4".to_string(),
            hit_point_ability: AbilityKey::Presence,
            silver_dice: "1d4".to_string(),
            silver_multiplier: 10,
            omens_dice: "1d4".to_string(),
            weapons_dice: "1d4".to_string(),
            armor_dice: "1d2".to_string(),
            ability_options: vec![
                "Speaks with carrion birds".to_string(),
                "Needs no fire to sleep".to_string(),
                "Maps drawn from memory".to_string(),
                "Fasts for a week unharmed".to_string(),
                "Counts the stars honestly".to_string(),
                "Forgotten by wolves".to_string(),
            ],
            starting_abilities: 1,
            origins: None,
        },
    ];

    ClassCatalog::new(classes).expect("built-in class data is valid")
}

fn gear(name: &str, group: i32, order: i32) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        kind: ItemKind::Gear,
        scroll_type: None,
        starting: Some(StartingEquipment {
            group,
            order,
            quantity: None,
            mod_ability: None,
        }),
        quantity: 1,
        silver: 0,
        encumbrance: Encumbrance::default(),
        damage_dice: None,
        armor_tier: None,
        usage_die: None,
    }
}

fn weapon(name: &str, order: i32, damage: &str, silver: i32) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        kind: ItemKind::Weapon,
        scroll_type: None,
        starting: Some(StartingEquipment {
            group: 1,
            order,
            quantity: None,
            mod_ability: None,
        }),
        quantity: 1,
        silver,
        encumbrance: Encumbrance {
            sacks: 0,
            stones: 1,
            soaps: 0,
        },
        damage_dice: Some(damage.to_string()),
        armor_tier: None,
        usage_die: None,
    }
}

fn armor(name: &str, tier: u8, silver: i32, stones: u32) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        kind: ItemKind::Armor,
        scroll_type: None,
        starting: None,
        quantity: 1,
        silver,
        encumbrance: Encumbrance {
            sacks: 0,
            stones,
            soaps: 0,
        },
        damage_dice: None,
        armor_tier: Some(ArmorTier::new(tier)),
        usage_die: None,
    }
}

fn scroll(name: &str, scroll_type: ScrollType) -> EquipmentItem {
    EquipmentItem {
        name: name.to_string(),
        kind: ItemKind::Scroll,
        scroll_type: Some(scroll_type),
        starting: None,
        quantity: 1,
        silver: 0,
        encumbrance: Encumbrance {
            sacks: 0,
            stones: 0,
            soaps: 1,
        },
        damage_dice: None,
        armor_tier: None,
        usage_die: None,
    }
}

/// The built-in equipment catalog.
///
/// Gear table 1 is rolled with 1d6; tables 2 and 3 with 1d12, where a 5 on
/// table 2 grants a random unclean scroll and a 2 on table 3 a random
/// sacred scroll, so those rows have no gear entry.
pub fn doom_items() -> ItemCatalog {
    let mut items = vec![
        // Gear, table 1 (1d6)
        gear("Tattered backpack", 1, 1),
        gear("Waterskin and dried rations", 1, 2),
        gear("Tallow torches", 1, 3),
        gear("Hemp rope, thirty feet", 1, 4),
        gear("Oil lamp and flask of oil", 1, 5),
        gear("Mildewed bedroll", 1, 6),
        // Gear, table 2 (1d12, row 5 reserved)
        gear("Crowbar", 2, 1),
        gear("Needle and gut thread", 2, 2),
        gear("Grappling hook", 2, 3),
        gear("Rusty manacles with key", 2, 4),
        gear("Bear trap", 2, 6),
        gear("Hooded lantern", 2, 7),
        gear("Cracked hand mirror", 2, 8),
        gear("Pouch of salt", 2, 9),
        gear("Iron nails", 2, 10),
        gear("Bag of caltrops", 2, 11),
        gear("Flint and steel", 2, 12),
        // Gear, table 3 (1d12, row 2 reserved)
        gear("Short shovel", 3, 1),
        gear("Vial of grave water", 3, 3),
        gear("Lump of chalk", 3, 4),
        gear("Bundle of wolfsbane", 3, 5),
        gear("Wooden stakes and mallet", 3, 6),
        gear("Censer on a chain", 3, 7),
        gear("Bottle of strong spirits", 3, 8),
        gear("Fishing net", 3, 9),
        gear("Cracked hourglass", 3, 10),
        gear("Tallow candles", 3, 11),
        gear("Stubborn mule", 3, 12),
        // Weapons (rolled with the class's weapon dice)
        weapon("Femur club", 1, "1d4", 5),
        weapon("Rusty knife", 2, "1d4", 10),
        weapon("Weighted staff", 3, "1d4", 5),
        weapon("Sling and stones", 4, "1d4", 10),
        weapon("Hand axe", 5, "1d6", 25),
        weapon("Shortsword", 6, "1d6", 40),
        weapon("Spiked flail", 7, "1d8", 60),
        weapon("Crossbow and bolts", 8, "1d8", 80),
        weapon("Warhammer", 9, "1d8", 60),
        weapon("Zweihander", 10, "1d10", 120),
        // Armor (indexed directly by the class's armor dice)
        armor("Nothing but rags", 0, 0, 0),
        armor("Boiled leather", 1, 20, 1),
        armor("Scale hauberk", 2, 100, 2),
        armor("Battered plate", 3, 250, 3),
        // Scrolls
        scroll("Palms Out of the Grave", ScrollType::Unclean),
        scroll("Teeth of the Earth", ScrollType::Unclean),
        scroll("Whispering Gloom", ScrollType::Unclean),
        scroll("Seven Flies of Ruin", ScrollType::Unclean),
        scroll("Grace of a Dead Saint", ScrollType::Sacred),
        scroll("Unyielding Lantern", ScrollType::Sacred),
        scroll("Word Against Venom", ScrollType::Sacred),
        scroll("Shield of Bone and Psalm", ScrollType::Sacred),
    ];

    // Quantities that scale with an ability at allocation time
    for item in &mut items {
        match item.name.as_str() {
            "Waterskin and dried rations" => {
                if let Some(starting) = &mut item.starting {
                    starting.quantity = Some(4);
                    starting.mod_ability = Some(AbilityKey::Toughness);
                }
            }
            "Tallow torches" => {
                item.usage_die = Some("1d4".to_string());
                if let Some(starting) = &mut item.starting {
                    starting.quantity = Some(3);
                    starting.mod_ability = Some(AbilityKey::Presence);
                }
            }
            "Oil lamp and flask of oil" | "Hooded lantern" => {
                item.usage_die = Some("1d6".to_string());
            }
            "Iron nails" => {
                if let Some(starting) = &mut item.starting {
                    starting.quantity = Some(12);
                }
            }
            "Tallow candles" => {
                if let Some(starting) = &mut item.starting {
                    starting.quantity = Some(10);
                }
            }
            _ => {}
        }
    }

    ItemCatalog::new(items).expect("built-in item data is valid")
}

/// The built-in name grid (6 rows of 8) and the three d20 biography tables.
pub fn doom_names() -> NameTables {
    let names: Vec<Vec<String>> = [
        ["Agn", "Belsum", "Brint", "Dagna", "Eldur", "Fering", "Grimvald", "Hargha"],
        ["Ilse", "Jortun", "Katla", "Lifthrasir", "Margit", "Nifel", "Ormhild", "Prugl"],
        ["Qillak", "Ragnvei", "Svind", "Torva", "Urlik", "Vanja", "Wilhema", "Ysgard"],
        ["Askel", "Birgir", "Colfax", "Drude", "Embla", "Fenrik", "Gorm", "Hestla"],
        ["Ingmar", "Jorunn", "Kveld", "Ljot", "Morna", "Njall", "Oddny", "Palle"],
        ["Runa", "Sigvald", "Tyrfing", "Ulfhild", "Valdis", "Wermund", "Yrsa", "Zedek"],
    ]
    .iter()
    .map(|row| row.iter().map(|s| (*s).to_string()).collect())
    .collect();

    let traits = to_strings(&[
        "Bitter",
        "Restless",
        "Cruel when cornered",
        "Pious beyond reason",
        "Cowardly",
        "Gallows-humored",
        "Stubborn as frost",
        "Greedy",
        "Tender-hearted",
        "Suspicious of everyone",
        "Reckless",
        "Quiet",
        "Vindictive",
        "Sentimental",
        "Honest to a fault",
        "Scheming",
        "Melancholic",
        "Boastful",
        "Fatalistic",
        "Curious past all sense",
    ]);

    let bodies = to_strings(&[
        "Your face is a map of old scars.",
        "You are gaunt as a winter birch.",
        "One eye is milk-white and sees nothing.",
        "Your hands shake unless they hold a weapon.",
        "You are broad-backed and slow.",
        "Pox marks cover your neck.",
        "Your teeth are filed to points.",
        "You walk with a dead man's limp.",
        "Your hair fell out in one night.",
        "Frostbite took two of your fingers.",
        "You are small enough to be overlooked.",
        "A brand on your cheek names you thief.",
        "Your skin never tans, only burns.",
        "You are handsome, which no one trusts.",
        "Old chains wore grooves into your wrists.",
        "Your voice is a ruined whisper.",
        "You smell faintly of grave soil.",
        "A badly set arm bends the wrong way.",
        "Your eyes are two different colors.",
        "You look ten years older than you are.",
    ]);

    let habits = to_strings(&[
        "You chew iron nails to calm yourself.",
        "You talk in your sleep, in a language you do not speak.",
        "You count every coin twice.",
        "You cannot pass a grave without spitting on it.",
        "You keep a dead beetle in your pocket for luck.",
        "You hum psalms backwards.",
        "You sleep sitting upright, knife in hand.",
        "You lie about small things for no reason.",
        "You name every weapon you carry.",
        "You eat only after everyone else has.",
        "You carve a tally mark for each day survived.",
        "You never say the name of the dead.",
        "You drink to remember, not to forget.",
        "You apologize to doors before opening them.",
        "You collect teeth. You do not say whose.",
        "You whistle when the road goes dark.",
        "You swear oaths you intend to keep.",
        "You read the clouds like scripture.",
        "You braid straw charms against the basilisk.",
        "You wake at the same hour, every night.",
    ]);

    NameTables::new(names, traits, bodies, habits).expect("built-in name data is valid")
}

fn to_strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_validate() {
        let catalog = doom_classes();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.classless().is_classless());
        for class in catalog.classes() {
            assert!(class.starting_abilities as usize <= class.ability_options.len());
        }
    }

    #[test]
    fn gear_table_one_is_complete() {
        let catalog = doom_items();
        let gear = catalog.entities(ItemKind::Gear);
        for order in 1..=6 {
            assert!(
                gear.iter()
                    .any(|i| i.starting.is_some_and(|s| s.group == 1 && s.order == order)),
                "missing gear 1/{order}"
            );
        }
    }

    #[test]
    fn reserved_scroll_rows_have_no_gear() {
        let catalog = doom_items();
        let gear = catalog.entities(ItemKind::Gear);
        assert!(
            !gear
                .iter()
                .any(|i| i.starting.is_some_and(|s| s.group == 2 && s.order == 5))
        );
        assert!(
            !gear
                .iter()
                .any(|i| i.starting.is_some_and(|s| s.group == 3 && s.order == 2))
        );
        // every other 1d12 row resolves
        for order in (1..=12).filter(|&o| o != 5) {
            assert!(
                gear.iter()
                    .any(|i| i.starting.is_some_and(|s| s.group == 2 && s.order == order)),
                "missing gear 2/{order}"
            );
        }
        for order in (1..=12).filter(|&o| o != 2) {
            assert!(
                gear.iter()
                    .any(|i| i.starting.is_some_and(|s| s.group == 3 && s.order == order)),
                "missing gear 3/{order}"
            );
        }
    }

    #[test]
    fn weapon_table_covers_every_class_roll() {
        let classes = doom_classes();
        let items = doom_items();
        let weapons = items.entities(ItemKind::Weapon);
        // The widest weapon dice in the preset is 1d10
        for order in 1..=10 {
            assert!(
                weapons
                    .iter()
                    .any(|w| w.starting.is_some_and(|s| s.group == 1 && s.order == order)),
                "missing weapon 1/{order}"
            );
        }
        for class in classes.classes() {
            assert!(["1d4", "1d6", "1d10"].contains(&class.weapons_dice.as_str()));
        }
    }

    #[test]
    fn armor_list_covers_every_class_roll() {
        let items = doom_items();
        // Armor is indexed directly, 1-based; the widest armor dice is 1d4
        assert_eq!(items.entities(ItemKind::Armor).len(), 4);
    }

    #[test]
    fn scrolls_exist_for_both_types() {
        let items = doom_items();
        assert!(!items.scrolls(ScrollType::Unclean).is_empty());
        assert!(!items.scrolls(ScrollType::Sacred).is_empty());
    }

    #[test]
    fn rations_scale_with_toughness() {
        let items = doom_items();
        let rations = items
            .all()
            .iter()
            .find(|i| i.name == "Waterskin and dried rations")
            .unwrap();
        let starting = rations.starting.unwrap();
        assert_eq!(starting.quantity, Some(4));
        assert_eq!(starting.mod_ability, Some(AbilityKey::Toughness));
    }
}
