use crate::JobId;
use thiserror::Error;

/// Errors raised while building a [`Column`](super::Column).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Cannot build a column from an empty job set")]
    EmptyColumn,

    #[error("Column references unknown job {0}")]
    UnknownJob(JobId),
}

/// Errors raised by the pricing oracle.
///
/// None of these abort a master loop by themselves; the caller decides.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    #[error("Expected {expected} dual prices, one per job, got {actual}")]
    DualLengthMismatch { expected: usize, actual: usize },

    #[error("Fixed assignment refers to unknown column {column} ({available} columns)")]
    UnknownColumn { column: usize, available: usize },

    #[error("Column {column} covers row {row}, but the instance has {rows} rows")]
    RowOutOfRange {
        column: usize,
        row: usize,
        rows: usize,
    },

    #[error("Column {column} has {indices} row indices but {coefficients} coefficients")]
    MalformedColumn {
        column: usize,
        indices: usize,
        coefficients: usize,
    },

    #[error("The dynamic program cannot price {0} conflicting candidate pairs")]
    ConflictsNotSupported(usize),

    #[error(transparent)]
    Column(#[from] ColumnError),
}
