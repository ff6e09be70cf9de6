use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatmulError {
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("output shape mismatch: expected {expected:?}, got {got:?}")]
    OutputShape {
        expected: (usize, usize),
        got: (usize, usize),
    },
    #[error("ragged rows: row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("worker pool needs at least one thread, got {0}")]
    InvalidThreadCount(usize),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, MatmulError>;
