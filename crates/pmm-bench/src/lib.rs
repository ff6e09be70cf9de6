//! Timing harness comparing the sequential and parallel multipliers.
//!
//! Each strategy is run once to warm up and then a fixed number of timed
//! repetitions; the mean wall-clock time of each is reported together with
//! speedup and efficiency, and the two outputs are compared cell by cell.

use std::fmt;
use std::ops::RangeInclusive;
use std::thread;
use std::time::{Duration, Instant};

use pmm_core::{Element, MatmulError, Matrix, Multiplier};
use rand::Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("matmul error: {0}")]
    Matmul(#[from] MatmulError),
    #[error("at least one timed run is required")]
    NoRuns,
    #[error("too many timed runs: {0}")]
    TooManyRuns(usize),
    #[error("empty value range {min}..={max}")]
    EmptyRange { min: Element, max: Element },
    #[error("cannot compare a {expected:?} matrix with a {got:?} one")]
    ShapeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;

/// A `rows x cols` matrix with values drawn uniformly from `range`.
pub fn random_matrix<R: Rng>(
    rows: usize,
    cols: usize,
    range: RangeInclusive<Element>,
    rng: &mut R,
) -> Result<Matrix> {
    if range.is_empty() {
        return Err(BenchError::EmptyRange {
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(Matrix::from_fn(rows, cols, |_, _| rng.gen_range(range.clone())))
}

/// Call `f` once untimed, then `runs` more times, and return the mean
/// duration of the timed calls.
pub fn time_runs<F>(runs: usize, mut f: F) -> Result<Duration>
where
    F: FnMut() -> pmm_core::Result<()>,
{
    if runs == 0 {
        return Err(BenchError::NoRuns);
    }
    let divisor = u32::try_from(runs).map_err(|_| BenchError::TooManyRuns(runs))?;
    f()?;
    let mut total = Duration::ZERO;
    for run in 0..runs {
        let start = Instant::now();
        f()?;
        let elapsed = start.elapsed();
        debug!(run, ?elapsed, "timed run");
        total += elapsed;
    }
    Ok(total / divisor)
}

/// Time `strategy` on `a @ b` and return the mean duration with the product.
pub fn measure(
    strategy: &dyn Multiplier,
    a: &Matrix,
    b: &Matrix,
    runs: usize,
) -> Result<(Duration, Matrix)> {
    let mut c = Matrix::new(a.rows(), b.cols());
    let mean = time_runs(runs, || strategy.multiply(a, b, &mut c))?;
    debug!(strategy = strategy.name(), ?mean, "measured");
    Ok((mean, c))
}

/// A cell where two results disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    pub expected: Element,
    pub actual: Element,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "result mismatch at row {}, col {}: expected {}, got {}",
            self.row, self.col, self.expected, self.actual
        )
    }
}

/// Every cell where `actual` differs from `expected`, in row-major order.
pub fn find_mismatches(expected: &Matrix, actual: &Matrix) -> Result<Vec<Mismatch>> {
    if expected.shape() != actual.shape() {
        return Err(BenchError::ShapeMismatch {
            expected: expected.shape(),
            got: actual.shape(),
        });
    }
    let mut out = Vec::new();
    for (row, (e, a)) in expected.iter_rows().zip(actual.iter_rows()).enumerate() {
        for (col, (&want, &got)) in e.iter().zip(a).enumerate() {
            if want != got {
                out.push(Mismatch {
                    row,
                    col,
                    expected: want,
                    actual: got,
                });
            }
        }
    }
    Ok(out)
}

/// Hardware threads available to this process, at least 1.
pub fn hardware_threads() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// Summary of one sequential vs parallel comparison.
#[derive(Debug, Clone)]
pub struct Report {
    pub sequential: Duration,
    pub parallel: Duration,
    pub hardware_threads: usize,
    pub mismatches: usize,
}

impl Report {
    /// `sequential / parallel`, or `None` if the parallel time is zero.
    pub fn speedup(&self) -> Option<f64> {
        if self.parallel.is_zero() {
            return None;
        }
        Some(self.sequential.as_secs_f64() / self.parallel.as_secs_f64())
    }

    /// Speedup per hardware thread, as a percentage.
    pub fn efficiency_percent(&self) -> Option<f64> {
        if self.hardware_threads == 0 {
            return None;
        }
        self.speedup().map(|s| 100.0 * s / self.hardware_threads as f64)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Average Sequential Time: {:.2} ms",
            self.sequential.as_secs_f64() * 1000.0
        )?;
        writeln!(
            f,
            "  Average Parallel Time: {:.2} ms",
            self.parallel.as_secs_f64() * 1000.0
        )?;
        match (self.speedup(), self.efficiency_percent()) {
            (Some(speedup), Some(efficiency)) => {
                writeln!(f, "Speedup: {:.2}", speedup)?;
                write!(f, "Efficiency {:.2}%", efficiency)?;
            }
            _ => {
                writeln!(f, "Speedup: n/a")?;
                write!(f, "Efficiency n/a")?;
            }
        }
        if self.mismatches > 0 {
            write!(f, "\nMismatched cells: {}", self.mismatches)?;
        }
        Ok(())
    }
}
