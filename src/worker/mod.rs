//! Chunk worker
//!
//! A [`Worker`] is the execution unit the coordinator runs on its own thread.
//! It is bound to one [`Chunk`] of the flattened index space and borrows the
//! matrix read-only. Running it consumes it and yields a [`PartialSum`], so
//! the created → running → completed lifecycle is enforced by ownership: a
//! worker cannot be re-run and its result cannot be read before it exists.
//!
//! # Example
//!
//! ```
//! use matsum::coordinator::partition::Chunk;
//! use matsum::matrix::Matrix;
//! use matsum::worker::{AccumulatorMode, Worker};
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]])?;
//! // Chunk [2, 4) overruns the matrix by one index, which is skipped
//! let partial = Worker::new(1, &m, Chunk::new(2, 2), AccumulatorMode::Precise).run();
//! assert_eq!(partial.value, 3.0);
//! assert_eq!(partial.visited, 1);
//! # Ok::<(), matsum::SumError>(())
//! ```

use crate::coordinator::partition::Chunk;
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Numeric representation a worker accumulates into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccumulatorMode {
    /// `f64` accumulator matching the element type
    #[default]
    Precise,
    /// `i64` accumulator narrowed after every add (truncates toward zero)
    Truncating,
}

impl fmt::Display for AccumulatorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccumulatorMode::Precise => write!(f, "precise"),
            AccumulatorMode::Truncating => write!(f, "truncating"),
        }
    }
}

/// Running total for one chunk
pub(crate) trait Accumulator: Default {
    fn add(&mut self, value: f64);
    fn value(&self) -> f64;
}

impl Accumulator for f64 {
    #[inline]
    fn add(&mut self, value: f64) {
        *self += value;
    }

    #[inline]
    fn value(&self) -> f64 {
        *self
    }
}

/// Integer accumulator: each add widens to `f64`, adds, and narrows back.
///
/// `as` truncates toward zero and saturates at the `i64` bounds.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Truncating(i64);

impl Accumulator for Truncating {
    #[inline]
    fn add(&mut self, value: f64) {
        self.0 = (self.0 as f64 + value) as i64;
    }

    #[inline]
    fn value(&self) -> f64 {
        self.0 as f64
    }
}

/// Result of one completed worker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialSum {
    /// Worker ID, equal to the chunk's position in the plan
    pub worker_id: usize,
    /// Chunk the worker was bound to
    pub chunk: Chunk,
    /// Sum of the in-bounds cells of the chunk
    pub value: f64,
    /// Number of in-bounds cells actually added
    pub visited: usize,
}

/// Sums the cells of one chunk
#[derive(Debug, Clone, Copy)]
pub struct Worker<'m> {
    id: usize,
    matrix: &'m Matrix,
    chunk: Chunk,
    mode: AccumulatorMode,
}

impl<'m> Worker<'m> {
    /// Bind a worker to `chunk` of `matrix`
    pub fn new(id: usize, matrix: &'m Matrix, chunk: Chunk, mode: AccumulatorMode) -> Self {
        Self {
            id,
            matrix,
            chunk,
            mode,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Run to completion and hand back the partial sum
    pub fn run(self) -> PartialSum {
        let (value, visited) = match self.mode {
            AccumulatorMode::Precise => self.sum_chunk::<f64>(),
            AccumulatorMode::Truncating => self.sum_chunk::<Truncating>(),
        };

        trace!(
            worker = self.id,
            start = self.chunk.start,
            len = self.chunk.len,
            visited,
            value,
            "worker completed"
        );

        PartialSum {
            worker_id: self.id,
            chunk: self.chunk,
            value,
            visited,
        }
    }

    fn sum_chunk<A: Accumulator>(&self) -> (f64, usize) {
        let mut acc = A::default();
        let mut visited = 0;

        if self.matrix.is_empty() {
            return (acc.value(), visited);
        }

        for offset in 0..self.chunk.len {
            let (row, col) = self.matrix.cell_of(self.chunk.start + offset);
            // Indices past the end of the last row are skipped, not errors
            if let Some(value) = self.matrix.get(row, col) {
                acc.add(value);
                visited += 1;
            }
        }

        (acc.value(), visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_worker_sums_its_chunk() {
        let m = matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);

        let first = Worker::new(0, &m, Chunk::new(0, 2), AccumulatorMode::Precise).run();
        assert_eq!(first.value, 3.0);
        assert_eq!(first.visited, 2);

        let second = Worker::new(1, &m, Chunk::new(2, 2), AccumulatorMode::Precise).run();
        assert_eq!(second.value, 7.0);
        assert_eq!(second.worker_id, 1);
        assert_eq!(second.chunk, Chunk::new(2, 2));
    }

    #[test]
    fn test_worker_chunk_crosses_rows() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        // Indices 2, 3, 4 -> (0,2), (1,0), (1,1)
        let partial = Worker::new(0, &m, Chunk::new(2, 3), AccumulatorMode::Precise).run();
        assert_eq!(partial.value, 3.0 + 4.0 + 5.0);
    }

    #[test]
    fn test_worker_skips_out_of_range() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0]]);
        let partial = Worker::new(0, &m, Chunk::new(2, 5), AccumulatorMode::Precise).run();
        assert_eq!(partial.value, 3.0);
        assert_eq!(partial.visited, 1);

        let beyond = Worker::new(1, &m, Chunk::new(10, 4), AccumulatorMode::Precise).run();
        assert_eq!(beyond.value, 0.0);
        assert_eq!(beyond.visited, 0);
    }

    #[test]
    fn test_worker_empty_chunk() {
        let m = matrix(vec![vec![1.0]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 0), AccumulatorMode::Precise).run();
        assert_eq!(partial.value, 0.0);
        assert_eq!(partial.visited, 0);
    }

    #[test]
    fn test_worker_zero_column_matrix() {
        let m = matrix(vec![vec![], vec![]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 3), AccumulatorMode::Precise).run();
        assert_eq!(partial.value, 0.0);
    }

    #[test]
    fn test_precise_keeps_fractions() {
        let m = matrix(vec![vec![0.5, 0.25, 0.25]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 3), AccumulatorMode::Precise).run();
        assert_eq!(partial.value, 1.0);
    }

    #[test]
    fn test_truncating_narrows_each_add() {
        let m = matrix(vec![vec![0.5, 0.5]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 2), AccumulatorMode::Truncating).run();
        assert_eq!(partial.value, 0.0);

        // 0 + 1.9 -> 1, then 1 + 2.9 = 3.9 -> 3
        let m = matrix(vec![vec![1.9, 2.9]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 2), AccumulatorMode::Truncating).run();
        assert_eq!(partial.value, 3.0);
    }

    #[test]
    fn test_truncating_toward_zero_for_negatives() {
        // 0 - 1.5 = -1.5 -> -1, then -1 - 1.5 = -2.5 -> -2
        let m = matrix(vec![vec![-1.5, -1.5]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 2), AccumulatorMode::Truncating).run();
        assert_eq!(partial.value, -2.0);
    }

    #[test]
    fn test_truncating_exact_on_integers() {
        let m = matrix(vec![vec![10.0, -3.0], vec![7.0, 1.0]]);
        let partial = Worker::new(0, &m, Chunk::new(0, 4), AccumulatorMode::Truncating).run();
        assert_eq!(partial.value, 15.0);
    }
}
