use std::fs;
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::Rng;
use serde_json::json;

use gv_gen::{CharacterDraft, CharacterGenerator, GeneratorConfig};

pub fn run(data: Option<&Path>, file: &Path, seed: Option<u64>, json: bool) -> Result<(), String> {
    let content = fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let character: CharacterDraft =
        serde_json::from_str(&content).map_err(|e| format!("invalid character file: {e}"))?;

    let catalogs = super::load_catalogs(data)?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let config = GeneratorConfig::default().with_seed(seed);
    let mut generator =
        CharacterGenerator::new(&catalogs.classes, &catalogs.items, &catalogs.names, config);

    let delta = generator
        .level_up(&character)
        .map_err(|e| format!("level-up failed: {e}"))?;

    if json {
        let output = json!({
            "seed": seed,
            "delta": delta,
            "log": generator.roll_log(),
        });
        let rendered = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    println!(
        "  {} {}",
        "Level-up".bold(),
        format!("(seed {seed})").dimmed()
    );

    if delta.is_empty() {
        println!("  The grave keeps what it has. No changes.");
    } else {
        if !delta.stat_changes.is_empty() {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Stat", "New value"]);
            for (path, value) in &delta.stat_changes {
                table.add_row(vec![path.clone(), value.to_string()]);
            }
            println!("{table}");
        }
        for item in &delta.new_items {
            println!("  Gained: {}", item.name);
        }
    }

    println!();
    println!("{}", generator.roll_log().export_text());

    Ok(())
}
