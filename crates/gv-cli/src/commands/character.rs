use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::Rng;
use serde_json::json;

use gv_core::{CarriedLoad, EquipmentItem};
use gv_gen::{CharacterDraft, CharacterGenerator, GeneratorConfig};

/// Options for the `character` subcommand.
pub struct CharacterOptions {
    pub class: Option<String>,
    pub roll_name: bool,
    pub seed: Option<u64>,
    pub count: u32,
    pub items: bool,
    pub log: bool,
    pub json: bool,
}

pub fn run(data: Option<&Path>, opts: &CharacterOptions) -> Result<(), String> {
    let catalogs = super::load_catalogs(data)?;
    let base_seed = opts.seed.unwrap_or_else(|| rand::rng().random());

    // Bulk generation gets one generator (and so one transcript) per
    // character, with seeds derived from the base.
    for index in 0..opts.count {
        let seed = base_seed.wrapping_add(u64::from(index));
        let config = GeneratorConfig::default().with_seed(seed);
        let mut generator = CharacterGenerator::new(
            &catalogs.classes,
            &catalogs.items,
            &catalogs.names,
            config,
        );

        let draft = generator
            .character(opts.class.as_deref(), opts.roll_name)
            .map_err(|e| format!("generation failed: {e}"))?;
        let items = if opts.items {
            Some(
                generator
                    .items(&draft)
                    .map_err(|e| format!("item allocation failed: {e}"))?,
            )
        } else {
            None
        };

        if opts.json {
            let output = json!({
                "seed": seed,
                "draft": draft,
                "items": items,
                "log": generator.roll_log(),
            });
            let rendered = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
            println!("{rendered}");
        } else {
            print_draft(&draft, items.as_deref(), seed);
            if opts.log {
                println!("{}", generator.roll_log().export_text());
            }
        }
    }

    Ok(())
}

fn print_draft(draft: &CharacterDraft, items: Option<&[EquipmentItem]>, seed: u64) {
    let name = draft.name.as_deref().unwrap_or("Unnamed wretch");
    println!(
        "  {} {}",
        name.bold(),
        format!("({}, seed {seed})", draft.class.name).dimmed()
    );
    println!("  {}", draft.biography);
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Strength", "Agility", "Presence", "Toughness"]);
    table.add_row(vec![
        draft.abilities.strength.to_string(),
        draft.abilities.agility.to_string(),
        draft.abilities.presence.to_string(),
        draft.abilities.toughness.to_string(),
    ]);
    println!("{table}");

    println!(
        "  HP {}  Powers {}  Omens {}  Silver {}",
        draft.health, draft.powers, draft.omens, draft.silver
    );

    if !draft.class.abilities.is_empty() {
        println!("  Traits: {}", draft.class.abilities.join(", "));
    }
    if let Some(origin) = &draft.class.origin {
        println!("  Origin: {origin}");
    }

    if let Some(items) = items {
        if items.is_empty() {
            println!("  No starting equipment.");
        } else {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Item", "Kind", "Qty", "Notes"]);
            for item in items {
                table.add_row(vec![
                    item.name.clone(),
                    item.kind.to_string(),
                    item.quantity.to_string(),
                    item_notes(item),
                ]);
            }
            println!("{table}");

            let load = CarriedLoad::tally(items);
            let burden = if load.over_encumbered() {
                " (over-encumbered)"
            } else if load.encumbered() {
                " (encumbered)"
            } else {
                ""
            };
            println!("  Load: {} slots{burden}", load.slots_used);
        }
    }
    println!();
}

fn item_notes(item: &EquipmentItem) -> String {
    if let Some(damage) = &item.damage_dice {
        return format!("damage {damage}");
    }
    if let Some(tier) = &item.armor_tier {
        return format!("tier {}, reduction {}", tier.value, tier.damage_reduction());
    }
    if let Some(scroll_type) = item.scroll_type {
        return scroll_type.to_string();
    }
    if let Some(usage) = &item.usage_die {
        return format!("usage die {usage}");
    }
    String::new()
}
