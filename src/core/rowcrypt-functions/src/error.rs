//! Function layer error types.

use thiserror::Error;

/// Errors raised for malformed calls.
///
/// Bad data never produces one of these; it produces a null result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FunctionError {
    /// No function with this name is registered.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments.
    #[error("{function} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Function name.
        function: String,
        /// Accepted argument count.
        expected: String,
        /// Supplied argument count.
        actual: usize,
    },

    /// A batch column does not have one value per row.
    #[error("column {column} has {actual} value(s), expected {expected}")]
    RowCountMismatch {
        /// Zero-based column index.
        column: usize,
        /// Number of rows in the batch.
        expected: usize,
        /// Number of values in the column.
        actual: usize,
    },
}
