//! Chunk planning over the flattened index space
//!
//! A [`ChunkPlan`] is computed once, before any worker starts, from the total
//! element count and the requested worker count. Two strategies exist:
//!
//! - **Remainder** (default): `chunk = total / N + total % N`. Every chunk has
//!   the same length and the last one may run past the end of the matrix; the
//!   worker skips those indices. The number of chunks is
//!   `ceil(total / chunk)`, which can be smaller than `N`.
//! - **Even**: `chunk = ceil(total / N)` with the last chunk clipped, so no
//!   chunk ever reaches past the end.
//!
//! # Example
//!
//! ```
//! use matsum::coordinator::partition::{ChunkPlan, PartitionStrategy, WorkerCount};
//!
//! let workers = WorkerCount::new(2)?;
//! let plan = ChunkPlan::new(3, workers, PartitionStrategy::Remainder);
//! assert_eq!(plan.chunk_size(), 2);
//! assert_eq!(plan.len(), 2);
//! assert_eq!(plan.chunks()[1].end(), 4); // one index past the end
//! # Ok::<(), matsum::SumError>(())
//! ```

use crate::error::{Result, SumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Number of workers requested for a sum, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    /// Validate a worker count
    ///
    /// # Errors
    ///
    /// Returns [`SumError::InvalidArgument`] for zero.
    pub fn new(count: usize) -> Result<Self> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or_else(|| SumError::invalid_worker_count(count))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for WorkerCount {
    type Error = SumError;

    fn try_from(count: i64) -> Result<Self> {
        if count < 1 {
            return Err(SumError::invalid_worker_count(count));
        }
        let count = usize::try_from(count).map_err(|_| {
            SumError::InvalidArgument(format!("worker count {} does not fit in usize", count))
        })?;
        Self::new(count)
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the flattened index space is divided among workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionStrategy {
    /// `total / N + total % N` per chunk, last chunk may overrun
    #[default]
    Remainder,
    /// `ceil(total / N)` per chunk, last chunk clipped
    Even,
}

impl fmt::Display for PartitionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionStrategy::Remainder => write!(f, "remainder"),
            PartitionStrategy::Even => write!(f, "even"),
        }
    }
}

/// Half-open range `[start, start + len)` of flattened indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub start: usize,
    pub len: usize,
}

impl Chunk {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last index in the chunk
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Number of indices in the chunk that fall inside `[0, total)`
    pub fn in_bounds(&self, total: usize) -> usize {
        self.end().min(total).saturating_sub(self.start)
    }
}

/// Compute the per-chunk length for `total` elements
///
/// Returns 0 only when `total` is 0.
pub fn chunk_size(total: usize, workers: WorkerCount, strategy: PartitionStrategy) -> usize {
    let n = workers.get();
    match strategy {
        PartitionStrategy::Remainder => total / n + total % n,
        PartitionStrategy::Even => total.div_ceil(n),
    }
}

/// The full set of chunks for one sum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    total: usize,
    chunk_size: usize,
    strategy: PartitionStrategy,
    chunks: Vec<Chunk>,
}

impl ChunkPlan {
    /// Partition `total` elements among at most `workers` chunks
    pub fn new(total: usize, workers: WorkerCount, strategy: PartitionStrategy) -> Self {
        let size = chunk_size(total, workers, strategy);
        let mut chunks = Vec::with_capacity(workers.get().min(total));

        let mut start = 0;
        while start < total {
            let len = match strategy {
                PartitionStrategy::Remainder => size,
                PartitionStrategy::Even => size.min(total - start),
            };
            chunks.push(Chunk::new(start, len));
            start += size;
        }

        Self {
            total,
            chunk_size: size,
            strategy,
            chunks,
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of chunks, i.e. the number of workers that will actually run
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn total_elems(&self) -> usize {
        self.total
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Indices past the end of the matrix that some chunk still spans
    pub fn overrun(&self) -> usize {
        self.chunks
            .last()
            .map_or(0, |c| c.end().saturating_sub(self.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> WorkerCount {
        WorkerCount::new(n).unwrap()
    }

    /// Every index in `[0, total)` belongs to exactly one chunk
    fn covers_exactly_once(plan: &ChunkPlan) -> bool {
        let mut expected_start = 0;
        for chunk in plan.chunks() {
            if chunk.start != expected_start || chunk.len == 0 {
                return false;
            }
            expected_start = chunk.end();
        }
        expected_start >= plan.total_elems()
    }

    #[test]
    fn test_worker_count_rejects_zero() {
        assert!(matches!(WorkerCount::new(0), Err(SumError::InvalidArgument(_))));
        assert_eq!(WorkerCount::new(4).unwrap().get(), 4);
    }

    #[test]
    fn test_worker_count_rejects_negative() {
        assert!(matches!(WorkerCount::try_from(-3i64), Err(SumError::InvalidArgument(_))));
        assert!(matches!(WorkerCount::try_from(0i64), Err(SumError::InvalidArgument(_))));
        assert_eq!(WorkerCount::try_from(2i64).unwrap().get(), 2);
    }

    #[test]
    fn test_remainder_even_split() {
        // 2x2 matrix, 2 workers: 4/2 + 4%2 = 2
        let plan = ChunkPlan::new(4, workers(2), PartitionStrategy::Remainder);
        assert_eq!(plan.chunk_size(), 2);
        assert_eq!(plan.chunks(), &[Chunk::new(0, 2), Chunk::new(2, 2)]);
        assert_eq!(plan.overrun(), 0);
    }

    #[test]
    fn test_remainder_overrun() {
        // 1x3 matrix, 2 workers: 3/2 + 3%2 = 2, second chunk spans [2, 4)
        let plan = ChunkPlan::new(3, workers(2), PartitionStrategy::Remainder);
        assert_eq!(plan.chunk_size(), 2);
        assert_eq!(plan.chunks(), &[Chunk::new(0, 2), Chunk::new(2, 2)]);
        assert_eq!(plan.overrun(), 1);
        assert_eq!(plan.chunks()[1].in_bounds(3), 1);
    }

    #[test]
    fn test_remainder_fewer_chunks_than_workers() {
        // 10 elements, 4 workers: 10/4 + 10%4 = 2 + 2 = 4, so only 3 chunks
        let plan = ChunkPlan::new(10, workers(4), PartitionStrategy::Remainder);
        assert_eq!(plan.chunk_size(), 4);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.overrun(), 2);

        // 7 elements, 4 workers: 1 + 3 = 4, only 2 chunks
        let plan = ChunkPlan::new(7, workers(4), PartitionStrategy::Remainder);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_remainder_more_workers_than_elements() {
        // 4 elements, 10 workers: 0 + 4 = 4, a single chunk covers everything
        let plan = ChunkPlan::new(4, workers(10), PartitionStrategy::Remainder);
        assert_eq!(plan.chunks(), &[Chunk::new(0, 4)]);
    }

    #[test]
    fn test_single_worker() {
        for strategy in [PartitionStrategy::Remainder, PartitionStrategy::Even] {
            let plan = ChunkPlan::new(9, workers(1), strategy);
            assert_eq!(plan.chunks(), &[Chunk::new(0, 9)]);
        }
    }

    #[test]
    fn test_even_clips_last_chunk() {
        let plan = ChunkPlan::new(10, workers(4), PartitionStrategy::Even);
        assert_eq!(plan.chunk_size(), 3);
        assert_eq!(
            plan.chunks(),
            &[Chunk::new(0, 3), Chunk::new(3, 3), Chunk::new(6, 3), Chunk::new(9, 1)]
        );
        assert_eq!(plan.overrun(), 0);
        assert!(covers_exactly_once(&plan));
    }

    #[test]
    fn test_even_never_exceeds_worker_count() {
        for total in 1..200 {
            for n in 1..20 {
                let plan = ChunkPlan::new(total, workers(n), PartitionStrategy::Even);
                assert!(plan.len() <= n, "total={} n={}", total, n);
                assert!(covers_exactly_once(&plan), "total={} n={}", total, n);
                assert_eq!(plan.overrun(), 0);
            }
        }
    }

    #[test]
    fn test_remainder_always_covers() {
        for total in 1..200 {
            for n in 1..20 {
                let plan = ChunkPlan::new(total, workers(n), PartitionStrategy::Remainder);
                assert!(covers_exactly_once(&plan), "total={} n={}", total, n);
                assert!(plan.chunk_size() * n >= total);
                assert!(plan.len() <= n);
                assert_eq!(plan.len(), total.div_ceil(plan.chunk_size()));
            }
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = ChunkPlan::new(0, workers(3), PartitionStrategy::Remainder);
        assert!(plan.is_empty());
        assert_eq!(plan.chunk_size(), 0);
        assert_eq!(plan.overrun(), 0);
    }
}
