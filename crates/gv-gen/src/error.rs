//! Error types for the generation engine.

use gv_core::CoreError;

/// Alias for `Result<T, GenError>`.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur during a generation run.
///
/// All of these abort the run; no partial draft is returned. The roll log
/// accumulated up to the failure stays available on the generator for
/// diagnosis.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// A dice formula string could not be parsed.
    #[error("malformed dice formula: \"{0}\"")]
    MalformedFormula(String),

    /// An excluded-value reroll could not settle on a different value.
    #[error("reroll of {formula} excluding {forbidden} did not settle after {attempts} attempts")]
    RerollDeadlock {
        /// The formula being rerolled.
        formula: String,
        /// The value that had to be avoided.
        forbidden: i32,
        /// How many attempts were made before giving up.
        attempts: u32,
    },

    /// Trait selection kept rolling duplicates past the retry ceiling.
    #[error("trait selection for \"{class}\" stalled after {attempts} attempts")]
    TraitSelectionStalled {
        /// The class whose traits were being rolled.
        class: String,
        /// How many rolls were made before giving up.
        attempts: u32,
    },

    /// A class grants more distinct traits than its option table holds.
    #[error("class \"{class}\" needs {needed} distinct traits but offers {available}")]
    InsufficientOptions {
        /// The class whose traits were being rolled.
        class: String,
        /// Required number of distinct traits.
        needed: u32,
        /// Distinct options actually available.
        available: usize,
    },

    /// A catalog required by a generation step has no usable entries.
    #[error("catalog has no {0}")]
    EmptyCatalog(&'static str),

    /// A rolled index missed a validated lookup table.
    #[error("no entry at index {index} of the {table} table")]
    TableMiss {
        /// The table that was indexed.
        table: &'static str,
        /// The 1-based index that missed.
        index: i32,
    },

    /// Invalid reference data.
    #[error(transparent)]
    Core(#[from] CoreError),
}
