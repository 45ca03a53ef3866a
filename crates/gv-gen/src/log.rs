//! The roll log: an ordered transcript of every randomness invocation
//! during one generation run.
//!
//! Entries are append-only and never mutated. One log belongs to exactly
//! one run; concurrent runs must use independent logs or their transcripts
//! interleave.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The dice portion of a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBreakdown {
    /// Canonical formula, runtime modifier folded in (e.g. `3d6+2`).
    pub formula: String,
    /// The individual die faces, in roll order.
    pub raw_results: Vec<u32>,
    /// Sum of the faces plus modifiers.
    pub total: i32,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollLogEntry {
    /// Step name (e.g. "Strength", "Treasure").
    pub name: String,
    /// Human-readable description of what the step decided.
    pub description: String,
    /// The roll, or `None` for steps that consumed no randomness.
    pub roll: Option<RollBreakdown>,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}

/// An append-only, chronological roll transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollLog {
    entries: Vec<RollLogEntry>,
}

impl RollLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: RollLogEntry) {
        self.entries.push(entry);
    }

    /// All entries, in generation order.
    pub fn entries(&self) -> &[RollLogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the transcript as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Roll Transcript\n===============\n\n");
        for entry in &self.entries {
            match &entry.roll {
                Some(roll) => {
                    let faces: Vec<String> =
                        roll.raw_results.iter().map(ToString::to_string).collect();
                    out.push_str(&format!(
                        "{}: {} [{}] = {}\n",
                        entry.name,
                        roll.formula,
                        faces.join(", "),
                        roll.total
                    ));
                    if !entry.description.is_empty() {
                        out.push_str(&format!("  {}\n", entry.description));
                    }
                }
                None => {
                    out.push_str(&format!("{}: {}\n", entry.name, entry.description));
                }
            }
        }
        out
    }

    /// Export the transcript as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Roll Transcript\n\n");
        for entry in &self.entries {
            match &entry.roll {
                Some(roll) => {
                    let faces: Vec<String> =
                        roll.raw_results.iter().map(ToString::to_string).collect();
                    out.push_str(&format!(
                        "**{}**: `{}` [{}] = **{}**\n",
                        entry.name,
                        roll.formula,
                        faces.join(", "),
                        roll.total
                    ));
                    if !entry.description.is_empty() {
                        out.push_str(&format!("  {}\n", entry.description));
                    }
                    out.push('\n');
                }
                None => {
                    out.push_str(&format!("**{}**: {}\n\n", entry.name, entry.description));
                }
            }
        }
        out
    }
}
