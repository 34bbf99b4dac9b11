//! Single-threaded reference sum
//!
//! Walks the matrix row by row on the calling thread. Used as the oracle the
//! parallel sum is checked against.
//!
//! A `Truncating` total depends on where each accumulator starts, so
//! [`SequentialSum::sum_planned`] replays a chunk plan on one thread with a
//! fresh accumulator per chunk.

use super::{ChunkPlan, MatrixSum};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::worker::{Accumulator, AccumulatorMode, Truncating};

/// Naive row-by-row summation
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSum {
    accumulator: AccumulatorMode,
}

impl SequentialSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same accumulator as the parallel sum being checked
    pub fn with_accumulator(accumulator: AccumulatorMode) -> Self {
        Self { accumulator }
    }

    fn sum_rows<A: Accumulator>(matrix: &Matrix) -> f64 {
        let mut acc = A::default();
        for row in matrix.iter_rows() {
            for &value in row {
                acc.add(value);
            }
        }
        acc.value()
    }

    /// Sum chunk by chunk in plan order, one accumulator per chunk
    ///
    /// Indices a chunk spans past the end of the matrix are skipped.
    pub fn sum_planned(&self, matrix: &Matrix, plan: &ChunkPlan) -> f64 {
        match self.accumulator {
            AccumulatorMode::Precise => Self::sum_chunks::<f64>(matrix, plan),
            AccumulatorMode::Truncating => Self::sum_chunks::<Truncating>(matrix, plan),
        }
    }

    fn sum_chunks<A: Accumulator>(matrix: &Matrix, plan: &ChunkPlan) -> f64 {
        let cells = matrix.as_slice();
        plan.chunks()
            .iter()
            .map(|chunk| {
                let mut acc = A::default();
                let end = chunk.end().min(cells.len());
                for &value in &cells[chunk.start.min(end)..end] {
                    acc.add(value);
                }
                acc.value()
            })
            .sum()
    }
}

impl MatrixSum for SequentialSum {
    fn sum(&self, matrix: &Matrix) -> Result<f64> {
        Ok(match self.accumulator {
            AccumulatorMode::Precise => Self::sum_rows::<f64>(matrix),
            AccumulatorMode::Truncating => Self::sum_rows::<Truncating>(matrix),
        })
    }
}
