use thiserror::Error;

/// Errors raised by the statistics in [`crate::stats`].
///
/// All of them are detected before any partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// The input had no rows (or no values).
    #[error("empty input: at least one value is required")]
    EmptyInput,

    /// A required column is absent or null in some row.
    #[error("row {row}: missing value for field '{field}'")]
    MissingField { row: usize, field: String },

    /// A numeric column holds something that is not a number.
    #[error("row {row}: field '{field}' is not numeric (got '{value}')")]
    NotNumeric {
        row: usize,
        field: String,
        value: String,
    },

    /// The weights summed to zero.
    #[error("weights in field '{field}' sum to zero, weighted mean is undefined")]
    DivisionByZero { field: String },

    /// Trim proportion outside `[0, 0.5)`.
    #[error("proportion to cut must be in [0, 0.5), got {0}")]
    InvalidProportion(f64),
}
