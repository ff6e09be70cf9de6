//! `pmm-core` - dense integer matrix multiplication on a fixed-size worker pool.
//!
//! This crate provides:
//! - A `Matrix` type with independently owned rows
//! - A lazy, restartable zip over any number of indexable sources
//! - Dot-product reducers with pluggable combine strategies
//! - A sequential reference multiplier and a row-partitioned parallel one,
//!   both behind the `Multiplier` trait
//!
//! ```
//! use pmm_core::{multiply_parallel, multiply_sequential, Matrix};
//!
//! let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]])?;
//! let b = Matrix::from_rows(vec![vec![5, 6], vec![7, 8]])?;
//! let mut seq = Matrix::new(2, 2);
//! let mut par = Matrix::new(2, 2);
//! multiply_sequential(&a, &b, &mut seq)?;
//! multiply_parallel(&a, &b, &mut par)?;
//! assert_eq!(seq, par);
//! assert_eq!(par.row(1), &[43, 50]);
//! # Ok::<(), pmm_core::MatmulError>(())
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod reduce;
pub mod sequential;
pub mod zip;

// Re-export primary types at the crate root for convenience.
pub use backend::Multiplier;
pub use config::ParallelConfig;
pub use error::{MatmulError, Result};
pub use matrix::{Column, Element, Matrix};
pub use parallel::{multiply_parallel, multiply_parallel_with, ParallelMultiplier};
pub use reduce::{dot_fused, dot_zipped, Add, Combine, Multiply};
pub use sequential::{multiply_sequential, SequentialMultiplier};
pub use zip::{zip_lazy, Indexed, LambdaSeq};
