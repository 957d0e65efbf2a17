use std::ops::{Bound, RangeBounds};

use crate::errors::{ChunkBufferError, Result};
use crate::ChunkBuffer;

impl<C: AsRef<[u8]>> ChunkBuffer<C> {
    /// Copies the bytes in `[start, end)` of the logical concatenation.
    ///
    /// `end` past the buffer is clamped to [`ChunkBuffer::len`], and an
    /// empty range (`end <= start` after clamping) yields no bytes. Only
    /// negative bounds are rejected.
    pub fn range_read(&self, start: isize, end: isize) -> Result<Vec<u8>> {
        match (usize::try_from(start), usize::try_from(end)) {
            (Ok(from), Ok(to)) => Ok(self.slice(from..to)),
            _ => Err(ChunkBufferError::InvalidRange { start, end }),
        }
    }

    /// Copies the bytes covered by `range`, with the same clamping as
    /// [`ChunkBuffer::range_read`].
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Vec<u8> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        }
        .min(len);

        log::trace!("Reading range {}..{} of {} bytes", start, end, len);
        if end <= start {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(end - start);
        // chunks ending at or before `start` hold none of the range
        let first = self
            .prefix_lengths
            .partition_point(|&chunk_end| chunk_end <= start);
        let chunks = self.chunks[first..]
            .iter()
            .zip(&self.prefix_lengths[first..]);
        for (chunk, &chunk_end) in chunks {
            let bytes = chunk.as_ref();
            let chunk_start = chunk_end - bytes.len();
            let from = start.max(chunk_start) - chunk_start;
            let to = end.min(chunk_end) - chunk_start;
            result.extend_from_slice(&bytes[from..to]);
            if chunk_end >= end {
                break;
            }
        }
        result
    }
}
