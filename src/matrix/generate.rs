//! Reproducible random matrices
//!
//! Each row gets its own xoshiro256++ stream seeded from the base seed and the
//! row index, so rows can be filled in parallel with rayon and the result does
//! not depend on the size of the rayon pool.
//!
//! # Example
//!
//! ```
//! use matsum::config::MatrixConfig;
//! use matsum::matrix::generate::generate;
//!
//! let config = MatrixConfig { rows: 4, cols: 3, seed: 7, ..Default::default() };
//! let a = generate(&config)?;
//! let b = generate(&config)?;
//! assert_eq!(a, b);
//! assert_eq!(a.len(), 12);
//! # Ok::<(), matsum::SumError>(())
//! ```

use super::Matrix;
use crate::config::{MatrixConfig, ValueDistribution};
use crate::error::{Result, SumError};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_distr::Normal;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::debug;

/// Golden-ratio increment used to spread row seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Value sampler for one cell
#[derive(Debug, Clone, Copy)]
enum Sampler {
    Uniform(Uniform<f64>),
    Gaussian(Normal<f64>),
}

impl Sampler {
    fn from_config(config: &MatrixConfig) -> Result<Self> {
        if !config.min.is_finite() || !config.max.is_finite() {
            return Err(SumError::InvalidArgument(format!(
                "value range must be finite, got [{}, {}]",
                config.min, config.max
            )));
        }
        if config.min > config.max {
            return Err(SumError::InvalidArgument(format!(
                "value range is empty: min {} > max {}",
                config.min, config.max
            )));
        }

        match config.distribution {
            ValueDistribution::Uniform => {
                Ok(Sampler::Uniform(Uniform::new_inclusive(config.min, config.max)))
            }
            ValueDistribution::Gaussian => {
                let mean = (config.min + config.max) / 2.0;
                let stddev = config
                    .stddev
                    .unwrap_or((config.max - config.min) / 6.0);
                if stddev < 0.0 {
                    return Err(SumError::InvalidArgument(format!(
                        "gaussian stddev must not be negative, got {}",
                        stddev
                    )));
                }
                let normal = Normal::new(mean, stddev).map_err(|e| {
                    SumError::InvalidArgument(format!("invalid gaussian stddev {}: {}", stddev, e))
                })?;
                Ok(Sampler::Gaussian(normal))
            }
        }
    }

    #[inline]
    fn sample(&self, rng: &mut Xoshiro256PlusPlus, min: f64, max: f64) -> f64 {
        match self {
            Sampler::Uniform(dist) => dist.sample(rng),
            // Gaussian tails are clamped into the configured range
            Sampler::Gaussian(dist) => dist.sample(rng).clamp(min, max),
        }
    }
}

/// Seed for the RNG stream of `row`
#[inline]
fn row_seed(seed: u64, row: usize) -> u64 {
    seed ^ (row as u64).wrapping_add(1).wrapping_mul(SEED_STRIDE)
}

/// Generate a `rows x cols` matrix from `config`
///
/// # Errors
///
/// Returns [`SumError::InvalidArgument`] for an empty value range, an invalid
/// standard deviation, or a shape whose cell count overflows `usize`.
pub fn generate(config: &MatrixConfig) -> Result<Matrix> {
    let sampler = Sampler::from_config(config)?;
    let total = config.rows.checked_mul(config.cols).ok_or_else(|| {
        SumError::InvalidArgument(format!(
            "{}x{} matrix is too large",
            config.rows, config.cols
        ))
    })?;

    let mut data = vec![0.0; total];
    if total > 0 {
        data.par_chunks_mut(config.cols)
            .enumerate()
            .for_each(|(row, cells)| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(row_seed(config.seed, row));
                for cell in cells.iter_mut() {
                    let value = sampler.sample(&mut rng, config.min, config.max);
                    *cell = if config.integral { value.round() } else { value };
                }
            });
    }

    debug!(
        rows = config.rows,
        cols = config.cols,
        seed = config.seed,
        distribution = %config.distribution,
        "generated matrix"
    );

    Matrix::from_vec(config.rows, config.cols, data)
}
