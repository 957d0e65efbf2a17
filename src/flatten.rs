use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::FlattenConfig;
use crate::errors::Result;
use crate::ChunkBuffer;

/// Fixed-size set of threads used by [`ChunkBuffer::flatten_parallel`].
///
/// Building a pool spawns its threads once; reuse it across flattens.
#[derive(Debug)]
pub struct WorkerPool {
    pool: ThreadPool,
    max_workers: usize,
}

impl WorkerPool {
    pub fn new(config: &FlattenConfig) -> Result<Self> {
        let max_workers = config.workers();
        log::trace!(
            "Building flatten worker pool with {} workers",
            max_workers
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .thread_name(|i| format!("chunk-flatten-{}", i))
            .build()?;
        Ok(Self { pool, max_workers })
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }
}

/// How [`ChunkBuffer::flatten_with`] copies chunks into the result.
#[derive(Debug, Clone, Copy)]
pub enum FlattenStrategy<'p> {
    Sequential,
    Parallel(&'p WorkerPool),
}

impl<C: AsRef<[u8]>> ChunkBuffer<C> {
    /// Concatenates every chunk into a new vector on the calling thread.
    pub fn flatten(&self) -> Vec<u8> {
        log::debug!(
            "Flattening {} bytes from {} chunks",
            self.len(),
            self.chunks.len()
        );

        let mut result = Vec::with_capacity(self.len());
        for chunk in &self.chunks {
            result.extend_from_slice(chunk.as_ref());
        }
        result
    }

    pub fn flatten_with(&self, strategy: FlattenStrategy<'_>) -> Vec<u8>
    where
        C: Sync,
    {
        match strategy {
            FlattenStrategy::Sequential => self.flatten(),
            FlattenStrategy::Parallel(pool) => self.flatten_parallel(pool),
        }
    }

    /// Concatenates every chunk, copying them concurrently on `pool`.
    ///
    /// The result is preallocated and cut into one destination per chunk
    /// before any copy starts, so workers never share a byte. Blocks until
    /// every chunk has been copied.
    pub fn flatten_parallel(&self, pool: &WorkerPool) -> Vec<u8>
    where
        C: Sync,
    {
        if pool.max_workers() <= 1 || self.chunks.len() < 2 {
            return self.flatten();
        }
        log::debug!(
            "Flattening {} bytes from {} chunks on {} workers",
            self.len(),
            self.chunks.len(),
            pool.max_workers()
        );

        let mut result = vec![0u8; self.len()];
        let destinations =
            split_destinations(&mut result, &self.prefix_lengths);
        log::trace!("Split result into {} destinations", destinations.len());

        pool.pool.install(|| {
            destinations
                .into_par_iter()
                .zip(self.chunks.par_iter())
                .for_each(|(destination, chunk)| {
                    destination.copy_from_slice(chunk.as_ref())
                });
        });
        result
    }
}

/// Cuts `result` into consecutive slices ending at each prefix length.
fn split_destinations<'r>(
    mut result: &'r mut [u8],
    prefix_lengths: &[usize],
) -> Vec<&'r mut [u8]> {
    let mut destinations = Vec::with_capacity(prefix_lengths.len());
    let mut offset = 0;
    for &end in prefix_lengths {
        let (head, tail) =
            std::mem::take(&mut result).split_at_mut(end - offset);
        destinations.push(head);
        result = tail;
        offset = end;
    }
    destinations
}
