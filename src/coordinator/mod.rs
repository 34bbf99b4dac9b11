//! Coordinator module
//!
//! Partitions a matrix, runs one worker thread per chunk, and reduces the
//! partial sums once every worker has finished.
//!
//! # Lifecycle
//!
//! 1. **Plan**: compute a [`ChunkPlan`] from `R * C` and the worker count
//! 2. **Start**: spawn every worker on a scoped thread before joining any
//! 3. **Join**: wait on each worker in creation order
//! 4. **Reduce**: add the partial sums into the total
//!
//! Workers borrow the matrix; the scope guarantees every thread has finished
//! before `sum` returns, so no `Arc` or lock is involved. If a worker dies
//! before completing, the sum is abandoned with [`SumError::Interrupted`] and
//! no total is produced.
//!
//! # Example
//!
//! ```
//! use matsum::coordinator::{MatrixSum, MultiThreadedSum};
//! use matsum::matrix::Matrix;
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! let summer = MultiThreadedSum::new(2)?;
//! assert_eq!(summer.sum(&m)?, 10.0);
//!
//! assert!(MultiThreadedSum::new(0).is_err());
//! # Ok::<(), matsum::SumError>(())
//! ```

pub mod partition;
pub mod sequential;

pub use partition::{Chunk, ChunkPlan, PartitionStrategy, WorkerCount};
pub use sequential::SequentialSum;

use crate::error::{Result, SumError};
use crate::matrix::Matrix;
use crate::worker::{AccumulatorMode, PartialSum, Worker};
use tracing::debug;

/// A strategy for summing every cell of a matrix
pub trait MatrixSum {
    /// Sum all cells of `matrix`
    ///
    /// # Errors
    ///
    /// Implementations that run workers return [`SumError::Interrupted`] when a
    /// worker fails to complete.
    fn sum(&self, matrix: &Matrix) -> Result<f64>;
}

/// Tuning knobs for [`MultiThreadedSum`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumOptions {
    pub partition: PartitionStrategy,
    pub accumulator: AccumulatorMode,
}

/// Outcome of a sum with per-worker detail
#[derive(Debug, Clone)]
pub struct SumReport {
    /// Reduced total
    pub total: f64,
    /// Chunk plan the workers were built from
    pub plan: ChunkPlan,
    /// One entry per worker, in creation order
    pub partials: Vec<PartialSum>,
}

/// Sums a matrix on `N` worker threads over contiguous chunks
#[derive(Debug, Clone)]
pub struct MultiThreadedSum {
    workers: WorkerCount,
    options: SumOptions,
}

impl MultiThreadedSum {
    /// Create a summer using `worker_count` threads and default options
    ///
    /// # Errors
    ///
    /// Returns [`SumError::InvalidArgument`] if `worker_count` is 0.
    pub fn new(worker_count: usize) -> Result<Self> {
        Self::with_options(worker_count, SumOptions::default())
    }

    /// Create a summer with an explicit partition strategy and accumulator
    pub fn with_options(worker_count: usize, options: SumOptions) -> Result<Self> {
        let workers = WorkerCount::new(worker_count)?;
        Ok(Self { workers, options })
    }

    pub fn worker_count(&self) -> WorkerCount {
        self.workers
    }

    /// Chunk plan that `sum` would use for `matrix`
    pub fn plan(&self, matrix: &Matrix) -> ChunkPlan {
        ChunkPlan::new(matrix.len(), self.workers, self.options.partition)
    }

    /// Sum `matrix`, keeping every worker's partial result
    pub fn sum_detailed(&self, matrix: &Matrix) -> Result<SumReport> {
        self.sum_with(matrix, Worker::run)
    }

    /// Run the plan with `run` executing each worker on its own thread
    fn sum_with<'m, F>(&self, matrix: &'m Matrix, run: F) -> Result<SumReport>
    where
        F: Fn(Worker<'m>) -> PartialSum + Sync,
    {
        let plan = self.plan(matrix);
        debug!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            total_elems = plan.total_elems(),
            chunk_size = plan.chunk_size(),
            requested = self.workers.get(),
            workers = plan.len(),
            strategy = %plan.strategy(),
            "partitioned matrix"
        );

        if plan.is_empty() {
            return Ok(SumReport {
                total: 0.0,
                plan,
                partials: Vec::new(),
            });
        }

        // Build a worker per chunk
        let workers: Vec<Worker<'m>> = plan
            .chunks()
            .iter()
            .enumerate()
            .map(|(id, &chunk)| Worker::new(id, matrix, chunk, self.options.accumulator))
            .collect();

        let partials = run_workers(workers, &run)?;

        let total: f64 = partials.iter().map(|p| p.value).sum();
        debug!(total, workers = partials.len(), "reduced partial sums");

        Ok(SumReport {
            total,
            plan,
            partials,
        })
    }
}

impl MatrixSum for MultiThreadedSum {
    fn sum(&self, matrix: &Matrix) -> Result<f64> {
        self.sum_detailed(matrix).map(|report| report.total)
    }
}

/// Start every worker, then join them in creation order
///
/// Returns at the first worker that did not complete. Threads still running
/// at that point are joined by the scope before this returns.
fn run_workers<'m, F>(workers: Vec<Worker<'m>>, run: &F) -> Result<Vec<PartialSum>>
where
    F: Fn(Worker<'m>) -> PartialSum + Sync,
{
    let mut first_failure = None;

    let joined = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| {
                let id = worker.id();
                (id, scope.spawn(move |_| run(worker)))
            })
            .collect();

        let mut partials = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            match handle.join() {
                Ok(partial) => partials.push(partial),
                Err(_) => {
                    first_failure = Some(id);
                    return Err(SumError::Interrupted { worker_id: id });
                }
            }
        }
        Ok(partials)
    });

    match joined {
        Ok(result) => result,
        // Another worker also panicked after the first failure was seen
        Err(_) => Err(SumError::Interrupted {
            worker_id: first_failure.unwrap_or_default(),
        }),
    }
}
