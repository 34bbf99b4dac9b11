//! JSON output formatting

use super::RunSummary;
use crate::config::Config;
use crate::util::time::{elements_per_sec, format_duration};
use crate::worker::PartialSum;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::time::Duration;

/// Duration with both microseconds and human-readable format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonDuration {
    pub micros: u64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            micros: d.as_micros() as u64,
            human: format_duration(d),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMatrix {
    pub rows: usize,
    pub cols: usize,
    pub elements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPlan {
    pub strategy: String,
    pub chunk_size: usize,
    pub requested_workers: usize,
    pub workers: usize,
    pub overrun: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonVerification {
    pub expected: f64,
    pub matches: bool,
    pub difference: f64,
    pub elapsed: JsonDuration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSum {
    pub total: f64,
    pub elapsed: JsonDuration,
    pub elements_per_sec: f64,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub timestamp: String,
    pub config: Config,
    pub matrix: JsonMatrix,
    pub plan: JsonPlan,
    pub result: JsonSum,
    pub generate_elapsed: JsonDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<JsonVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<Vec<PartialSum>>,
}

impl JsonReport {
    pub fn from_summary(summary: &RunSummary) -> Self {
        let report = &summary.report;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            config: summary.config.clone(),
            matrix: JsonMatrix {
                rows: summary.rows,
                cols: summary.cols,
                elements: summary.elements(),
            },
            plan: JsonPlan {
                strategy: report.plan.strategy().to_string(),
                chunk_size: report.plan.chunk_size(),
                requested_workers: summary.config.sum.threads,
                workers: report.plan.len(),
                overrun: report.plan.overrun(),
            },
            result: JsonSum {
                total: report.total,
                elapsed: JsonDuration::from_duration(summary.sum_elapsed),
                elements_per_sec: elements_per_sec(summary.elements(), summary.sum_elapsed),
            },
            generate_elapsed: JsonDuration::from_duration(summary.generate_elapsed),
            verification: summary.verification.map(|v| JsonVerification {
                expected: v.expected,
                matches: v.matches,
                difference: v.difference(),
                elapsed: JsonDuration::from_duration(v.elapsed),
            }),
            workers: summary
                .config
                .output
                .per_worker
                .then(|| report.partials.clone()),
        }
    }
}

/// Serialize a run summary as pretty-printed JSON
pub fn to_json_string(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport::from_summary(summary))
        .context("Failed to serialize JSON report")
}

/// Print the JSON report to stdout
pub fn print_json(summary: &RunSummary) -> Result<()> {
    println!("{}", to_json_string(summary)?);
    Ok(())
}

/// Write the JSON report to a file
pub fn write_json(summary: &RunSummary, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &JsonReport::from_summary(summary))
        .with_context(|| format!("Failed to write JSON output: {}", path.display()))?;
    Ok(())
}
