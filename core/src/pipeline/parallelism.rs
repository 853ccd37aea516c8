//! Pool sizing configuration.

use crate::constants::DEFAULT_CHUNK_SIZE;

/// Parallelism configuration: worker count, bounded queue capacity, and the
/// chunk size fed to each worker.
///
/// Both pipeline queues use `queue_depth` slots, so in-flight memory stays at
/// O(queue_depth × chunk_size) no matter how long the input is.
#[derive(Debug, Clone)]
pub struct PoolProfile {
    pub workers: usize,
    pub queue_depth: usize,
    pub chunk_size: usize,
}

impl PoolProfile {
    pub fn new(workers: usize, queue_depth: usize, chunk_size: usize) -> Self {
        Self {
            workers: workers.max(1),
            queue_depth: queue_depth.max(1),
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn single_threaded() -> Self {
        Self::new(1, 1, DEFAULT_CHUNK_SIZE)
    }

    /// One worker per available execution unit, queues sized to the pool.
    pub fn dynamic() -> Self {
        let workers = num_cpus::get().max(1);
        Self::new(workers, workers, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Override the worker count; queue depth follows the pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self.queue_depth = self.workers;
        self
    }
}

impl Default for PoolProfile {
    fn default() -> Self {
        Self::dynamic()
    }
}
