//! Error types for the summation core
//!
//! The library surfaces a typed [`SumError`]; the binary and the configuration
//! layer wrap it in `anyhow` with context.

use thiserror::Error;

/// Errors raised by matrix construction and the parallel sum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SumError {
    /// Rejected configuration, detected before any work is scheduled
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A row whose length differs from the first row
    #[error("Matrix is not rectangular: row {row} has {actual} columns, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A worker never reached completion; the whole sum is abandoned
    #[error("Worker {worker_id} was interrupted before completing its chunk")]
    Interrupted { worker_id: usize },
}

impl SumError {
    /// Create an error for a worker count below one
    pub fn invalid_worker_count(count: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!(
            "at least 1 worker is required to sum a matrix, got {}",
            count
        ))
    }

    /// Whether the error aborted a running sum (as opposed to rejected input)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Result type alias using [`SumError`]
pub type Result<T> = std::result::Result<T, SumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_worker_count_message() {
        let err = SumError::invalid_worker_count(0);
        assert_eq!(
            err.to_string(),
            "Invalid argument: at least 1 worker is required to sum a matrix, got 0"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_interrupted_is_fatal() {
        let err = SumError::Interrupted { worker_id: 3 };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Worker 3"));
    }
}
