//! matsum CLI entry point

use anyhow::{Context, Result};
use matsum::config::{cli::Cli, toml as config_file, validator, Config, OutputFormat};
use matsum::coordinator::{ChunkPlan, MatrixSum, MultiThreadedSum, SequentialSum};
use matsum::matrix::generate::generate;
use matsum::output::{json, text, RunSummary, Verification};
use matsum::worker::AccumulatorMode;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = config_file::load_config(&cli).context("Failed to build configuration")?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "configuration loaded");

    let text_output = config.output.format == OutputFormat::Text;
    if text_output {
        println!("matsum v{}", env!("CARGO_PKG_VERSION"));
        println!("Parallel matrix summation");
        println!();
    }

    let summer = MultiThreadedSum::with_options(config.sum.threads, config.sum.options())
        .context("Failed to create summer")?;

    if cli.dry_run {
        let total = config.matrix.rows * config.matrix.cols;
        let plan = ChunkPlan::new(total, summer.worker_count(), config.sum.partition);
        text::print_plan(&plan, config.sum.threads);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    let summary = run(&config, &summer)?;

    match config.output.format {
        OutputFormat::Text => text::print_results(&summary),
        OutputFormat::Json => json::print_json(&summary)?,
    }

    if let Some(path) = &config.output.json_path {
        json::write_json(&summary, path)?;
        if text_output {
            println!();
            println!("JSON report written to {}", path.display());
        }
    }

    if !summary.verified() {
        anyhow::bail!("Parallel sum does not match the sequential sum");
    }

    Ok(())
}

/// Generate the matrix, sum it, and optionally verify the total
fn run(config: &Config, summer: &MultiThreadedSum) -> Result<RunSummary> {
    let generate_start = Instant::now();
    let matrix = generate(&config.matrix).context("Failed to generate matrix")?;
    let generate_elapsed = generate_start.elapsed();
    debug!(elapsed = ?generate_elapsed, "matrix ready");

    let sum_start = Instant::now();
    let report = summer.sum_detailed(&matrix).context("Parallel sum failed")?;
    let sum_elapsed = sum_start.elapsed();

    let verification = if config.sum.verify {
        let oracle = SequentialSum::with_accumulator(config.sum.accumulator);
        let verify_start = Instant::now();
        // Truncating totals depend on the chunk boundaries, so replay the plan
        let expected = match config.sum.accumulator {
            AccumulatorMode::Precise => oracle.sum(&matrix).context("Sequential sum failed")?,
            AccumulatorMode::Truncating => oracle.sum_planned(&matrix, &report.plan),
        };
        Some(Verification::new(
            report.total,
            expected,
            config.sum.accumulator,
            verify_start.elapsed(),
        ))
    } else {
        None
    };

    Ok(RunSummary {
        config: config.clone(),
        rows: matrix.rows(),
        cols: matrix.cols(),
        report,
        generate_elapsed,
        sum_elapsed,
        verification,
    })
}

/// Log to stderr so stdout stays clean for reports; RUST_LOG takes precedence
fn init_logging(debug: bool) {
    let default_filter = if debug { "matsum=debug" } else { "matsum=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
