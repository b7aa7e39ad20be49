//! Data-parallel execution over fixed partitions

/// Owned rayon pool and index partitioning
pub mod pool;

pub use pool::WorkerPool;
