//! Error types for catalog construction and validation.

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The name grid does not have the required dimensions.
    #[error("name grid must be {expected_rows} rows of {expected_columns} names, got {rows}x{columns}")]
    InvalidNameGrid {
        /// Required row count.
        expected_rows: usize,
        /// Required column count.
        expected_columns: usize,
        /// Actual row count.
        rows: usize,
        /// Actual column count of the first offending row.
        columns: usize,
    },

    /// A d20 lookup table does not have exactly twenty entries.
    #[error("table '{table}' must have exactly {expected} entries, got {actual}")]
    WrongTableLength {
        /// Which table is malformed.
        table: &'static str,
        /// Required entry count.
        expected: usize,
        /// Actual entry count.
        actual: usize,
    },

    /// Slot 0 of the class catalog is not the "Classless" sentinel.
    #[error("class catalog slot 0 must be the \"Classless\" sentinel")]
    MissingClassless,

    /// A class definition violates a catalog invariant.
    #[error("invalid class \"{class}\": {reason}")]
    InvalidClassDefinition {
        /// Name of the offending class.
        class: String,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A scroll item was declared without a scroll type.
    #[error("scroll item \"{0}\" is missing a scroll type")]
    MissingScrollType(String),

    /// Catalog JSON could not be parsed.
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}
