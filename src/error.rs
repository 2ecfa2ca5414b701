use chrono::NaiveDateTime;
use thiserror::Error;

/// Typed failures of the data layer.
///
/// Every operation reports its failure to the immediate caller; nothing is
/// swallowed and nothing retries. File-level wrappers attach path context
/// with `anyhow` but keep these in the error chain.
#[derive(Debug, Error)]
pub enum DataError {
    /// A raw field failed to parse (which row, which field, what it said).
    #[error("row {row}: invalid {field}: '{value}'")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// Timestamps are not strictly increasing.
    #[error("row {row}: timestamp {current} is not after {previous}")]
    Order {
        row: usize,
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },

    /// Invalid filter parameters (window size, stride).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filtering an empty series is undefined.
    #[error("cannot filter an empty series")]
    EmptySeries,

    /// The original and filtered series disagree on the time axis.
    #[error("series are not aligned: timestamp sequences differ at index {index}")]
    Alignment { index: usize },
}
