//! Human-readable text output

use super::RunSummary;
use crate::coordinator::ChunkPlan;
use crate::util::time::{elements_per_sec, format_duration, format_number, format_rate};
use std::fmt::Write;

/// Print run results to the console
pub fn print_results(summary: &RunSummary) {
    print!("{}", render_results(summary));
}

/// Print a chunk plan (used by `--dry-run`)
pub fn print_plan(plan: &ChunkPlan, requested: usize) {
    print!("{}", render_plan(plan, requested));
}

/// Render the chunk plan section
pub fn render_plan(plan: &ChunkPlan, requested: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "Partition:");
    let _ = writeln!(out, "  Strategy:   {}", plan.strategy());
    let _ = writeln!(out, "  Chunk size: {}", format_number(plan.chunk_size() as u64));
    let _ = writeln!(out, "  Workers:    {} (requested {})", plan.len(), requested);
    if plan.overrun() > 0 {
        let _ = writeln!(out, "  Overrun:    {} indices past the end (skipped)", plan.overrun());
    }
    out
}

/// Render the full results report
pub fn render_results(summary: &RunSummary) -> String {
    let mut out = String::new();
    let report = &summary.report;

    let _ = writeln!(out, "═══════════════════════════════════════════════════════════");
    let _ = writeln!(out, "                    SUM RESULTS");
    let _ = writeln!(out, "═══════════════════════════════════════════════════════════");
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Matrix: {} x {} ({} elements)",
        format_number(summary.rows as u64),
        format_number(summary.cols as u64),
        format_number(summary.elements() as u64)
    );
    let _ = writeln!(out, "Accumulator: {}", summary.config.sum.accumulator);
    let _ = writeln!(out);

    out.push_str(&render_plan(&report.plan, summary.config.sum.threads));
    let _ = writeln!(out);

    let rate = elements_per_sec(summary.elements(), summary.sum_elapsed);
    let _ = writeln!(out, "Total: {}", report.total);
    let _ = writeln!(out, "Generate Time: {}", format_duration(summary.generate_elapsed));
    let _ = writeln!(
        out,
        "Sum Time: {} ({} elements/s)",
        format_duration(summary.sum_elapsed),
        format_rate(rate)
    );

    if let Some(verification) = &summary.verification {
        let _ = writeln!(out);
        if verification.matches {
            let _ = writeln!(
                out,
                "Verification: OK (sequential sum {} in {})",
                verification.expected,
                format_duration(verification.elapsed)
            );
        } else {
            let _ = writeln!(
                out,
                "Verification: MISMATCH (sequential sum {}, difference {})",
                verification.expected,
                verification.difference()
            );
        }
    }

    if summary.config.output.per_worker {
        let _ = writeln!(out);
        let _ = writeln!(out, "Per-Worker:");
        for partial in &report.partials {
            let _ = writeln!(
                out,
                "  Worker {:>3}: [{}, {}) visited {} sum {}",
                partial.worker_id,
                partial.chunk.start,
                partial.chunk.end(),
                partial.visited,
                partial.value
            );
        }
    }

    out
}
