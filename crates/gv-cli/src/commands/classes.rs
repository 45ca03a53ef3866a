use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(data: Option<&Path>) -> Result<(), String> {
    let catalogs = super::load_catalogs(data)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Class", "HP", "Silver", "Omens", "Weapons", "Armor", "Traits", "Origins",
    ]);

    for class in catalogs.classes.classes() {
        if class.is_classless() {
            continue;
        }
        table.add_row(vec![
            class.name.clone(),
            format!("{} + {}", class.hit_point_dice, class.hit_point_ability),
            format!("{} x{}", class.silver_dice, class.silver_multiplier),
            class.omens_dice.clone(),
            class.weapons_dice.clone(),
            class.armor_dice.clone(),
            format!(
                "{} of {}",
                class.starting_abilities,
                class.ability_options.len()
            ),
            match &class.origins {
                Some(origins) => origins.options.len().to_string(),
                None => "-".to_string(),
            },
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} playable classes, plus the {} fallback",
        catalogs.classes.len().saturating_sub(1),
        catalogs.classes.classless().name
    );

    Ok(())
}
