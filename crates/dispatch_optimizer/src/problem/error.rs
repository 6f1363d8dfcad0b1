use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    #[error("Fleet must contain at least one vehicle")]
    EmptyFleet,

    #[error("Distance matrix must have {expected} rows, got {rows}")]
    MatrixRowCount { expected: usize, rows: usize },

    #[error("Distance matrix row {row} has {len} entries, expected {expected}")]
    MatrixRowLength {
        row: usize,
        len: usize,
        expected: usize,
    },
}
