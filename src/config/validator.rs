//! Configuration validation

use super::*;
use anyhow::Result;
use tracing::warn;

/// Upper bound on worker threads; one thread is spawned per chunk
pub const MAX_THREADS: usize = 4096;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_sum(&config.sum)?;
    validate_matrix(&config.matrix)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate sum configuration
pub fn validate_sum(sum: &SumConfig) -> Result<()> {
    if sum.threads == 0 {
        anyhow::bail!("threads must be at least 1, got 0");
    }
    if sum.threads > MAX_THREADS {
        anyhow::bail!("threads must be at most {}, got {}", MAX_THREADS, sum.threads);
    }

    Ok(())
}

/// Validate matrix generation parameters
pub fn validate_matrix(matrix: &MatrixConfig) -> Result<()> {
    if matrix.rows.checked_mul(matrix.cols).is_none() {
        anyhow::bail!("{}x{} matrix is too large", matrix.rows, matrix.cols);
    }

    if !matrix.min.is_finite() || !matrix.max.is_finite() {
        anyhow::bail!(
            "min ({}) and max ({}) must be finite",
            matrix.min,
            matrix.max
        );
    }

    if matrix.min > matrix.max {
        anyhow::bail!("min ({}) must not exceed max ({})", matrix.min, matrix.max);
    }

    if let Some(stddev) = matrix.stddev {
        if !stddev.is_finite() || stddev < 0.0 {
            anyhow::bail!("stddev must be a non-negative number, got {}", stddev);
        }
        if matrix.distribution != ValueDistribution::Gaussian {
            warn!("stddev is ignored for the {} distribution", matrix.distribution);
        }
    }

    if matrix.rows == 0 || matrix.cols == 0 {
        warn!(
            "{}x{} matrix has no elements, the sum will be 0",
            matrix.rows, matrix.cols
        );
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(path) = &output.json_path {
        if path.as_os_str().is_empty() {
            anyhow::bail!("JSON output path must not be empty");
        }
        if path.is_dir() {
            anyhow::bail!("JSON output path {} is a directory", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut config = Config::default();
        config.sum.threads = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("threads must be at least 1"));
    }

    #[test]
    fn test_too_many_threads_rejected() {
        let mut config = Config::default();
        config.sum.threads = MAX_THREADS + 1;
        assert!(validate_config(&config).is_err());
        config.sum.threads = MAX_THREADS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = Config::default();
        config.matrix.min = 5.0;
        config.matrix.max = 1.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_non_finite_range_rejected() {
        let mut config = Config::default();
        config.matrix.max = f64::INFINITY;
        assert!(validate_config(&config).is_err());
        config.matrix.max = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_negative_stddev_rejected() {
        let mut config = Config::default();
        config.matrix.distribution = ValueDistribution::Gaussian;
        config.matrix.stddev = Some(-0.5);
        assert!(validate_config(&config).is_err());
        config.matrix.stddev = Some(0.5);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let mut config = Config::default();
        config.matrix.rows = usize::MAX;
        config.matrix.cols = 2;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_matrix_allowed() {
        let mut config = Config::default();
        config.matrix.rows = 0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_json_path_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.json_path = Some(dir.path().to_path_buf());
        assert!(validate_config(&config).is_err());

        config.output.json_path = Some(PathBuf::new());
        assert!(validate_config(&config).is_err());
    }
}
