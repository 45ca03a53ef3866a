//! Name and biography tables.
//!
//! A name is looked up by `(row, column)` coordinates from a 1d6/1d8 pair;
//! personality traits, body descriptions, and habits are flat d20 tables.
//! All tables are loaded once and never mutated.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Rows in the name grid, selected by 1d6.
pub const NAME_ROWS: usize = 6;
/// Columns in the name grid, selected by 1d8.
pub const NAME_COLUMNS: usize = 8;
/// Required length of the trait, body, and habit tables, selected by 1d20.
pub const D20_TABLE_LEN: usize = 20;

/// The biography and naming tables of a ruleset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawNameTables")]
pub struct NameTables {
    names: Vec<Vec<String>>,
    traits: Vec<String>,
    bodies: Vec<String>,
    habits: Vec<String>,
}

/// Unvalidated shape used for deserialization.
#[derive(Debug, Deserialize)]
struct RawNameTables {
    names: Vec<Vec<String>>,
    traits: Vec<String>,
    bodies: Vec<String>,
    habits: Vec<String>,
}

impl TryFrom<RawNameTables> for NameTables {
    type Error = CoreError;

    fn try_from(raw: RawNameTables) -> Result<Self, Self::Error> {
        Self::new(raw.names, raw.traits, raw.bodies, raw.habits)
    }
}

impl NameTables {
    /// Build the tables, validating the grid dimensions and table lengths.
    pub fn new(
        names: Vec<Vec<String>>,
        traits: Vec<String>,
        bodies: Vec<String>,
        habits: Vec<String>,
    ) -> CoreResult<Self> {
        if names.len() != NAME_ROWS || names.iter().any(|row| row.len() != NAME_COLUMNS) {
            let columns = names
                .iter()
                .find(|row| row.len() != NAME_COLUMNS)
                .map_or(NAME_COLUMNS, Vec::len);
            return Err(CoreError::InvalidNameGrid {
                expected_rows: NAME_ROWS,
                expected_columns: NAME_COLUMNS,
                rows: names.len(),
                columns,
            });
        }
        for (table, list) in [("traits", &traits), ("bodies", &bodies), ("habits", &habits)] {
            if list.len() != D20_TABLE_LEN {
                return Err(CoreError::WrongTableLength {
                    table,
                    expected: D20_TABLE_LEN,
                    actual: list.len(),
                });
            }
        }
        Ok(Self {
            names,
            traits,
            bodies,
            habits,
        })
    }

    /// Load tables from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(CoreError::from)
    }

    /// Name at 1-based `(row, column)` coordinates, or `None` if either
    /// coordinate is off the grid.
    pub fn name(&self, row: i32, column: i32) -> Option<&str> {
        let row = usize::try_from(row.checked_sub(1)?).ok()?;
        let column = usize::try_from(column.checked_sub(1)?).ok()?;
        self.names
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// Personality trait at a 1-based index.
    pub fn personality(&self, index: i32) -> Option<&str> {
        lookup(&self.traits, index)
    }

    /// Body description at a 1-based index.
    pub fn body(&self, index: i32) -> Option<&str> {
        lookup(&self.bodies, index)
    }

    /// Habit at a 1-based index.
    pub fn habit(&self, index: i32) -> Option<&str> {
        lookup(&self.habits, index)
    }
}

fn lookup(table: &[String], index: i32) -> Option<&str> {
    let index = usize::try_from(index.checked_sub(1)?).ok()?;
    table.get(index).map(String::as_str)
}
