//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the config file named on the command line (if any) and apply CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, base)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Sum settings
    if let Some(threads) = cli.threads {
        config.sum.threads = threads;
    }
    if let Some(partition) = cli.partition {
        config.sum.partition = partition.into();
    }
    if let Some(accumulator) = cli.accumulator {
        config.sum.accumulator = accumulator.into();
    }
    if cli.verify {
        config.sum.verify = true;
    }

    // Matrix settings
    if let Some(rows) = cli.rows {
        config.matrix.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.matrix.cols = cols;
    }
    if let Some(seed) = cli.seed {
        config.matrix.seed = seed;
    }
    if let Some(min) = cli.min {
        config.matrix.min = min;
    }
    if let Some(max) = cli.max {
        config.matrix.max = max;
    }
    if cli.integral {
        config.matrix.integral = true;
    }
    if let Some(distribution) = cli.distribution {
        config.matrix.distribution = distribution.into();
    }
    if let Some(stddev) = cli.stddev {
        config.matrix.stddev = Some(stddev);
    }

    // Output settings
    if let Some(format) = cli.output {
        config.output.format = format.into();
    }
    if let Some(path) = &cli.json_output {
        config.output.json_path = Some(path.clone());
    }
    if cli.per_worker {
        config.output.per_worker = true;
    }

    Ok(config)
}
