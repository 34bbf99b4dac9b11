//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::coordinator::{PartitionStrategy, SumOptions};
use crate::worker::AccumulatorMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sum: SumConfig,
    #[serde(default)]
    pub matrix: MatrixConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How the parallel sum is performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumConfig {
    /// Number of worker threads (must be >= 1)
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Chunk planning strategy
    #[serde(default)]
    pub partition: PartitionStrategy,
    /// Worker accumulator representation
    #[serde(default)]
    pub accumulator: AccumulatorMode,
    /// Compare the result against the sequential sum
    #[serde(default)]
    pub verify: bool,
}

fn default_threads() -> usize {
    num_cpus::get()
}

impl Default for SumConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            partition: PartitionStrategy::default(),
            accumulator: AccumulatorMode::default(),
            verify: false,
        }
    }
}

impl SumConfig {
    pub fn options(&self) -> SumOptions {
        SumOptions {
            partition: self.partition,
            accumulator: self.accumulator,
        }
    }
}

/// Generated input matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    #[serde(default = "default_dimension")]
    pub rows: usize,
    #[serde(default = "default_dimension")]
    pub cols: usize,
    /// RNG seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Smallest generated value
    #[serde(default)]
    pub min: f64,
    /// Largest generated value
    #[serde(default = "default_max")]
    pub max: f64,
    /// Round every value to the nearest integer
    #[serde(default)]
    pub integral: bool,
    #[serde(default)]
    pub distribution: ValueDistribution,
    /// Standard deviation for the gaussian distribution (default: range / 6)
    #[serde(default)]
    pub stddev: Option<f64>,
}

fn default_dimension() -> usize {
    1000
}

fn default_seed() -> u64 {
    42
}

fn default_max() -> f64 {
    100.0
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            rows: default_dimension(),
            cols: default_dimension(),
            seed: default_seed(),
            min: 0.0,
            max: default_max(),
            integral: false,
            distribution: ValueDistribution::default(),
            stddev: None,
        }
    }
}

/// Distribution of generated cell values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueDistribution {
    /// Uniform over `[min, max]`
    #[default]
    Uniform,
    /// Normal centred on the midpoint of `[min, max]`, clamped to the range
    Gaussian,
}

impl fmt::Display for ValueDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueDistribution::Uniform => write!(f, "uniform"),
            ValueDistribution::Gaussian => write!(f, "gaussian"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also write the JSON report to this path
    pub json_path: Option<PathBuf>,
    /// Include per-worker partial sums in the report
    #[serde(default)]
    pub per_worker: bool,
}

/// Report format printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.sum.threads >= 1);
        assert_eq!(config.sum.partition, PartitionStrategy::Remainder);
        assert_eq!(config.sum.accumulator, AccumulatorMode::Precise);
        assert!(!config.sum.verify);
        assert_eq!(config.matrix.rows, 1000);
        assert_eq!(config.matrix.cols, 1000);
        assert_eq!(config.matrix.seed, 42);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_sum_options() {
        let sum = SumConfig {
            threads: 3,
            partition: PartitionStrategy::Even,
            accumulator: AccumulatorMode::Truncating,
            verify: true,
        };
        let options = sum.options();
        assert_eq!(options.partition, PartitionStrategy::Even);
        assert_eq!(options.accumulator, AccumulatorMode::Truncating);
    }

    #[test]
    fn test_config_json_roundtrip_names() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["sum"]["partition"], "remainder");
        assert_eq!(json["sum"]["accumulator"], "precise");
        assert_eq!(json["matrix"]["distribution"], "uniform");
        assert_eq!(json["output"]["format"], "text");
    }
}
