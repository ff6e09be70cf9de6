use std::cell::Cell;

use scoped_threadpool::{Pool, Scope};
use tracing::trace;

use crate::error::{MatmulError, Result};

/// Lifecycle of a [`WorkerPool`]. States only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PoolState {
    /// Workers are spawned, nothing submitted yet.
    Created,
    /// Tasks may be submitted.
    Accepting,
    /// Submission is over; waiting for every task to finish.
    Draining,
    /// All tasks finished and the workers are retired.
    Terminated,
}

impl PoolState {
    /// The state that follows this one, if any.
    pub fn successor(self) -> Option<PoolState> {
        match self {
            PoolState::Created => Some(PoolState::Accepting),
            PoolState::Accepting => Some(PoolState::Draining),
            PoolState::Draining => Some(PoolState::Terminated),
            PoolState::Terminated => None,
        }
    }
}

/// A fixed-size pool of worker threads with a shared task queue.
///
/// The pool is single-use: [`WorkerPool::run`] consumes it, and by the time
/// `run` returns every submitted task has completed and every worker thread
/// has been joined.
pub struct WorkerPool {
    pool: Pool,
    state: PoolState,
}

impl WorkerPool {
    /// Spawn `threads` workers.
    ///
    /// # Errors
    /// Returns [`MatmulError::InvalidThreadCount`] for zero threads or a count
    /// that does not fit the underlying pool.
    pub fn new(threads: usize) -> Result<Self> {
        let n = u32::try_from(threads)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(MatmulError::InvalidThreadCount(threads))?;
        trace!(threads, "worker pool created");
        Ok(WorkerPool {
            pool: Pool::new(n),
            state: PoolState::Created,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.thread_count() as usize
    }

    pub fn state(&self) -> PoolState {
        self.state
    }

    /// Hand a [`Submitter`] to `submit`, then block until every task it
    /// submitted has run to completion.
    ///
    /// Tasks may borrow anything that outlives this call, so they can hold
    /// shared references to inputs and exclusive references to disjoint
    /// parts of an output.
    pub fn run<'scope, F>(self, submit: F) -> RunSummary
    where
        F: FnOnce(&Submitter<'_, 'scope>),
    {
        let WorkerPool { mut pool, state } = self;
        let mut states = vec![state];

        advance(&mut states);
        let tasks = pool.scoped(|scope| {
            let submitter = Submitter {
                scope,
                submitted: Cell::new(0),
            };
            submit(&submitter);
            let tasks = submitter.submitted.get();

            advance(&mut states);
            scope.join_all();
            trace!(tasks, "barrier passed");
            tasks
        });

        drop(pool);
        advance(&mut states);
        RunSummary { tasks, states }
    }
}

/// Outcome of [`WorkerPool::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of tasks submitted and completed.
    pub tasks: usize,
    /// Every state the pool passed through, starting with `Created`.
    pub states: Vec<PoolState>,
}

impl RunSummary {
    pub fn final_state(&self) -> Option<PoolState> {
        self.states.last().copied()
    }
}

fn advance(states: &mut Vec<PoolState>) {
    let Some(&from) = states.last() else {
        return;
    };
    if let Some(to) = from.successor() {
        trace!(?from, ?to, "worker pool state");
        states.push(to);
    }
}

/// Submission handle given to the closure passed to [`WorkerPool::run`].
pub struct Submitter<'a, 'scope> {
    scope: &'a Scope<'a, 'scope>,
    submitted: Cell<usize>,
}

impl<'scope> Submitter<'_, 'scope> {
    /// Queue `task` on the pool. It runs on some worker, in no particular
    /// order relative to other tasks.
    pub fn submit<T>(&self, task: T)
    where
        T: FnOnce() + Send + 'scope,
    {
        self.scope.execute(task);
        self.submitted.set(self.submitted.get() + 1);
    }

    /// Number of tasks submitted so far.
    pub fn submitted(&self) -> usize {
        self.submitted.get()
    }
}
