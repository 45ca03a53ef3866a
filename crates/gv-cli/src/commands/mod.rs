pub mod character;
pub mod classes;
pub mod levelup;

use std::fs;
use std::path::Path;

use gv_core::{ClassCatalog, ItemCatalog, NameTables, preset};

/// The three catalogs a generation run reads.
pub struct Catalogs {
    pub classes: ClassCatalog,
    pub items: ItemCatalog,
    pub names: NameTables,
}

/// Load catalogs from a data directory, or fall back to the built-in
/// ruleset when no directory is given.
pub fn load_catalogs(data: Option<&Path>) -> Result<Catalogs, String> {
    let Some(dir) = data else {
        return Ok(Catalogs {
            classes: preset::doom_classes(),
            items: preset::doom_items(),
            names: preset::doom_names(),
        });
    };

    let classes = read_file(dir, "classes.json")?;
    let items = read_file(dir, "items.json")?;
    let names = read_file(dir, "names.json")?;

    Ok(Catalogs {
        classes: ClassCatalog::from_json(&classes)
            .map_err(|e| format!("invalid classes.json: {e}"))?,
        items: ItemCatalog::from_json(&items).map_err(|e| format!("invalid items.json: {e}"))?,
        names: NameTables::from_json(&names).map_err(|e| format!("invalid names.json: {e}"))?,
    })
}

fn read_file(dir: &Path, file: &str) -> Result<String, String> {
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
