// Row-partitioned parallel engine.
//
// One task per output row. Each task reads all of A and B through shared
// references and owns a `&mut` borrow of exactly one row of C, so the hot
// path needs no locks or atomics. The pool's barrier publishes every row
// write to the caller before `multiply_parallel_with` returns.
pub mod pool;

pub use pool::{PoolState, RunSummary, Submitter, WorkerPool};

use tracing::{debug, trace};

use crate::backend::{check_shapes, Multiplier};
use crate::config::ParallelConfig;
use crate::error::Result;
use crate::matrix::{Element, Matrix};
use crate::reduce::{dot_zipped, Multiply};

/// Multiplier that spreads output rows over a call-scoped worker pool.
#[derive(Debug, Clone, Default)]
pub struct ParallelMultiplier {
    config: ParallelConfig,
}

impl ParallelMultiplier {
    pub fn new(config: ParallelConfig) -> Self {
        ParallelMultiplier { config }
    }

    /// Shorthand for a configuration with exactly `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self> {
        Ok(Self::new(ParallelConfig::new(threads)?))
    }

    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }
}

impl Multiplier for ParallelMultiplier {
    fn name(&self) -> &str {
        "parallel"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        multiply_parallel_with(a, b, c, &self.config)
    }
}

/// [`multiply_parallel_with`] using [`ParallelConfig::default`].
pub fn multiply_parallel(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
    multiply_parallel_with(a, b, c, &ParallelConfig::default())
}

/// Compute `c = a @ b` with one pool task per row of `c`.
///
/// The result is bit-identical to
/// [`multiply_sequential`](crate::sequential::multiply_sequential). A new
/// pool is spawned for the call and fully joined before returning.
///
/// # Errors
/// Returns an error if `a.cols() != b.rows()` or `c` is not
/// `a.rows() x b.cols()`. No task is started in that case.
pub fn multiply_parallel_with(
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    config: &ParallelConfig,
) -> Result<()> {
    check_shapes(a, b, c)?;
    let (m, k) = a.shape();
    let n = b.cols();
    debug!(m, k, n, threads = config.threads(), "parallel multiply");

    let pool = WorkerPool::new(config.threads())?;
    let summary = pool.run(|queue| {
        for (i, out) in c.rows_mut().enumerate() {
            queue.submit(move || fill_row(a, b, i, out));
        }
    });
    debug!(
        tasks = summary.tasks,
        state = ?summary.final_state(),
        "parallel multiply done"
    );
    Ok(())
}

/// Write row `i` of `a @ b` into `out`.
fn fill_row(a: &Matrix, b: &Matrix, i: usize, out: &mut [Element]) {
    let row = a.row(i);
    let k = a.cols();
    for (j, cell) in out.iter_mut().enumerate() {
        *cell = dot_zipped(row, b.column(j), k, &Multiply);
    }
    trace!(row = i, "row done");
}
