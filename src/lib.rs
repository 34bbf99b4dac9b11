//! matsum - parallel matrix summation
//!
//! matsum sums every cell of a rectangular matrix by splitting its row-major
//! index space into contiguous chunks, summing each chunk on its own thread,
//! and adding the partial sums once every worker has finished.
//!
//! # Architecture
//!
//! - **Matrix**: immutable row-major grid shared read-only by all workers
//! - **Partitioner**: chunk plan computed once from `R * C` and the worker count
//! - **Coordinator**: spawns scoped worker threads, joins them in order, reduces
//! - **Worker**: sums the in-bounds cells of one chunk
//!
//! # Example
//!
//! ```
//! use matsum::{Matrix, MatrixSum, MultiThreadedSum};
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0]])?;
//! let total = MultiThreadedSum::new(2)?.sum(&m)?;
//! assert_eq!(total, 6.0);
//! # Ok::<(), matsum::SumError>(())
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod matrix;
pub mod output;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{MatrixSum, MultiThreadedSum, SequentialSum, SumOptions};
pub use error::SumError;
pub use matrix::Matrix;

/// Result type used throughout the summation core
pub type Result<T> = error::Result<T>;
