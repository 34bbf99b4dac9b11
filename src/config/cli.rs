//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Chunk planning strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartitionArg {
    /// total/N + total%N per chunk (last chunk may overrun)
    Remainder,
    /// ceil(total/N) per chunk (last chunk clipped)
    Even,
}

/// Worker accumulator representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccumulatorArg {
    /// Floating-point accumulator
    Precise,
    /// Integer accumulator, truncates toward zero after every add
    Truncating,
}

/// Distribution of generated values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistributionArg {
    Uniform,
    Gaussian,
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Text,
    Json,
}

/// matsum - parallel matrix summation
#[derive(Parser, Debug)]
#[command(name = "matsum")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (command-line flags take precedence)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // === Sum Options ===
    /// Number of worker threads [default: number of CPUs]
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Chunk planning strategy [default: remainder]
    #[arg(long, value_enum)]
    pub partition: Option<PartitionArg>,

    /// Worker accumulator [default: precise]
    #[arg(long, value_enum)]
    pub accumulator: Option<AccumulatorArg>,

    /// Check the parallel result against a sequential sum
    #[arg(long)]
    pub verify: bool,

    // === Matrix Options ===
    /// Rows of the generated matrix [default: 1000]
    #[arg(short = 'r', long)]
    pub rows: Option<usize>,

    /// Columns of the generated matrix [default: 1000]
    #[arg(short = 'c', long)]
    pub cols: Option<usize>,

    /// RNG seed [default: 42]
    #[arg(long, env = "MATSUM_SEED")]
    pub seed: Option<u64>,

    /// Smallest generated value [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Largest generated value [default: 100]
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Round generated values to integers
    #[arg(long)]
    pub integral: bool,

    /// Distribution of generated values [default: uniform]
    #[arg(long, value_enum)]
    pub distribution: Option<DistributionArg>,

    /// Standard deviation for the gaussian distribution [default: (max-min)/6]
    #[arg(long)]
    pub stddev: Option<f64>,

    // === Output Options ===
    /// Report format [default: text]
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputArg>,

    /// Also write the JSON report to a file
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Include per-worker partial sums in the report
    #[arg(long)]
    pub per_worker: bool,

    // === Runtime Options ===
    /// Validate configuration and print the chunk plan without summing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
