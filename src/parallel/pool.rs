//! Explicit worker pool for the data-parallel phases
//!
//! Loading and stitching split their work into a fixed number of contiguous
//! chunks and run them on a pool owned by the caller. Each call returns only
//! after every chunk has finished, which is the barrier between phases.

use crate::io::error::{Result, invalid_parameter};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::ops::Range;

/// Split `0..len` into at most `parts` contiguous, non-empty ranges
///
/// Earlier ranges are never shorter than later ones.
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1).min(len.max(1));
    let base = len / parts;
    let extra = len % parts;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for part in 0..parts {
        let size = base + usize::from(part < extra);
        if size == 0 {
            break;
        }
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Owned rayon pool with a fixed worker count
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with `threads` workers, or one per available core
    ///
    /// # Errors
    ///
    /// Returns an error if zero threads are requested or the operating
    /// system refuses to spawn the workers
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let workers = match threads {
            Some(0) => {
                return Err(invalid_parameter(
                    "threads",
                    &0,
                    &"at least one worker thread is required",
                ));
            }
            Some(n) => n,
            None => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tilestitch-worker-{i}"))
            .build()?;

        log::debug!("worker pool started with {workers} threads");
        Ok(Self { pool, workers })
    }

    /// Number of worker threads
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Rows per band when splitting `height` rows across the workers
    pub fn band_rows(&self, height: usize) -> usize {
        height.div_ceil(self.workers).max(1)
    }

    /// Apply `f` to every index in `0..len`, preserving order
    pub fn map<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let chunks = partition(len, self.workers);
        let results: Vec<Vec<T>> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .map(|range| range.map(&f).collect())
                .collect()
        });
        results.into_iter().flatten().collect()
    }

    /// Fallible [`WorkerPool::map`]; the first error in index order wins
    ///
    /// # Errors
    ///
    /// Returns an error produced by `f`
    pub fn try_map<T, E, F>(&self, len: usize, f: F) -> std::result::Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(usize) -> std::result::Result<T, E> + Sync,
    {
        let chunks = partition(len, self.workers);
        let results: Vec<std::result::Result<Vec<T>, E>> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .map(|range| range.map(&f).collect())
                .collect()
        });

        let mut flat = Vec::with_capacity(len);
        for chunk in results {
            flat.extend(chunk?);
        }
        Ok(flat)
    }

    /// Run `op` inside the pool so nested rayon calls use its workers
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        self.pool.install(op)
    }
}
