use std::env;
use std::thread;

use crate::error::{MatmulError, Result};

/// Worker count used when the available parallelism cannot be detected.
pub const DEFAULT_THREADS: usize = 4;

/// Environment variable that overrides the worker count.
pub const THREADS_ENV: &str = "PMM_THREADS";

/// Configuration for the parallel engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    threads: usize,
}

impl ParallelConfig {
    /// A configuration with exactly `threads` workers.
    ///
    /// # Errors
    /// Returns [`MatmulError::InvalidThreadCount`] if `threads` is zero.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(MatmulError::InvalidThreadCount(threads));
        }
        Ok(ParallelConfig { threads })
    }

    /// One worker per hardware thread, or [`DEFAULT_THREADS`] if that is
    /// unknown.
    pub fn detected() -> Self {
        let threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(DEFAULT_THREADS);
        ParallelConfig { threads }
    }

    /// Read the worker count from `PMM_THREADS`, falling back to
    /// [`ParallelConfig::detected`] when it is unset.
    pub fn from_env() -> Result<Self> {
        match env::var(THREADS_ENV) {
            Ok(v) => Self::from_value(Some(&v)),
            Err(env::VarError::NotPresent) => Self::from_value(None),
            Err(e) => Err(MatmulError::Config(format!("{}: {}", THREADS_ENV, e))),
        }
    }

    /// Parse an optional textual worker count, as found in the environment.
    pub fn from_value(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value else {
            return Ok(Self::detected());
        };
        let threads = raw.trim().parse::<usize>().map_err(|e| {
            MatmulError::Config(format!("{}={:?}: {}", THREADS_ENV, raw, e))
        })?;
        Self::new(threads)
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::detected()
    }
}
