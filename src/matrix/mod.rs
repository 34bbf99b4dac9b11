//! Immutable rectangular matrix
//!
//! Cells are stored row-major in a single buffer so the flattened index space
//! the coordinator partitions is the storage order itself. A `Matrix` has no
//! mutating methods once built; workers only ever see `&Matrix`.
//!
//! # Example
//!
//! ```
//! use matsum::matrix::Matrix;
//!
//! let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
//! assert_eq!(m.len(), 4);
//! assert_eq!(m.cell_of(3), (1, 1));
//! assert_eq!(m.get(1, 0), Some(3.0));
//! # Ok::<(), matsum::SumError>(())
//! ```

pub mod generate;

use crate::error::{Result, SumError};

/// Read-only 2-D grid of `f64` values
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from a list of rows
    ///
    /// # Errors
    ///
    /// Returns [`SumError::NonRectangular`] if any row length differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(SumError::NonRectangular {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build a matrix from a row-major buffer
    ///
    /// # Errors
    ///
    /// Returns [`SumError::InvalidArgument`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            SumError::InvalidArgument(format!("{}x{} matrix is too large", rows, cols))
        })?;
        if data.len() != expected {
            return Err(SumError::InvalidArgument(format!(
                "{}x{} matrix needs {} values, got {}",
                rows,
                cols,
                expected,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows (R)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (C)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (R * C)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Map a flattened index to its `(row, col)` cell
    ///
    /// The mapping is `(i / C, i % C)` and is defined for any `i`, including
    /// indices past the end; callers check the returned row against
    /// [`rows()`](Self::rows). Must not be called on a matrix with zero columns.
    #[inline]
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Value at `(row, col)`, or `None` when out of bounds
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0, and a zero-column matrix has no cells anyway
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Row-major view of every cell
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
