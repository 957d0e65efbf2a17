//! # Chunk Buffer
//!
//! `chunk-buffer` accumulates byte fragments without concatenating them.
//! Every [`ChunkBuffer::append`] keeps the caller's chunk as-is and records
//! the running total of bytes written so far. The contiguous bytes are only
//! produced on demand:
//!
//! - [`ChunkBuffer::flatten`] materializes the whole buffer, sequentially or
//!   on a bounded [`WorkerPool`];
//! - [`ChunkBuffer::range_read`] materializes a sub-range only, touching just
//!   the chunks that overlap it.
//!
//! The chunk type is generic. Borrowed slices (`&[u8]`) make the buffer a
//! view over memory the caller keeps immutable for the buffer's lifetime;
//! shared handles such as `bytes::Bytes` or `Arc<[u8]>` let the buffer
//! outlive the writer's stack frame. Bytes are never copied on append.
//!
//! ```
//! use chunk_buffer::ChunkBuffer;
//!
//! let mut buffer = ChunkBuffer::new();
//! buffer.append(&b"012345"[..]);
//! buffer.append(&b"67890a"[..]);
//! buffer.append(&b"bcdef"[..]);
//!
//! assert_eq!(buffer.len(), 17);
//! assert_eq!(buffer.flatten(), b"01234567890abcdef");
//! assert_eq!(buffer.range_read(6, 10).unwrap(), b"7890");
//! ```

pub mod config;
pub mod errors;
mod flatten;
mod range;

pub use config::{default_max_workers, set_default_max_workers, FlattenConfig};
pub use errors::{ChunkBufferError, Result};
pub use flatten::{FlattenStrategy, WorkerPool};

/// Append-only list of byte chunks with a cumulative length index.
#[derive(Debug, Clone)]
pub struct ChunkBuffer<C> {
    /// Chunks in write order
    chunks: Vec<C>,
    /// `prefix_lengths[i]` is the total length of `chunks[..=i]`
    prefix_lengths: Vec<usize>,
}

impl<C> Default for ChunkBuffer<C> {
    fn default() -> Self {
        Self {
            chunks: Vec::new(),
            prefix_lengths: Vec::new(),
        }
    }
}

impl<C: AsRef<[u8]>> ChunkBuffer<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `chunks` appends before
    /// reallocating its index.
    pub fn with_capacity(chunks: usize) -> Self {
        Self {
            chunks: Vec::with_capacity(chunks),
            prefix_lengths: Vec::with_capacity(chunks),
        }
    }

    /// Appends `chunk` without copying its bytes.
    ///
    /// Zero-length chunks are recorded like any other.
    pub fn append(&mut self, chunk: C) {
        let total = self.len() + chunk.as_ref().len();
        self.chunks.push(chunk);
        self.prefix_lengths.push(total);
    }

    /// Total number of bytes appended since creation or the last reset.
    pub fn len(&self) -> usize {
        self.prefix_lengths.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of appended chunks, zero-length ones included.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over the chunks in write order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.chunks.iter().map(|c| c.as_ref())
    }

    /// Maps an absolute offset to `(chunk index, offset inside the chunk)`.
    ///
    /// Returns `None` when `offset` is past the end of the buffer.
    pub fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        if offset >= self.len() {
            return None;
        }
        let index = self
            .prefix_lengths
            .partition_point(|&end| end <= offset);
        Some((index, offset - self.chunk_start(index)))
    }

    /// Drops every chunk, keeping the index allocations for reuse.
    pub fn reset(&mut self) {
        log::debug!(
            "Resetting buffer of {} bytes in {} chunks",
            self.len(),
            self.chunks.len()
        );
        self.chunks.clear();
        self.prefix_lengths.clear();
    }

    /// Absolute offset of the first byte of chunk `index`.
    fn chunk_start(&self, index: usize) -> usize {
        self.prefix_lengths[index] - self.chunks[index].as_ref().len()
    }
}

impl<C: AsRef<[u8]>> Extend<C> for ChunkBuffer<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        for chunk in iter {
            self.append(chunk);
        }
    }
}

impl<C: AsRef<[u8]>> FromIterator<C> for ChunkBuffer<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}
