//! Main analysis pipeline for search-stats.
//!
//! Loads an export, runs the aggregation pass and returns an
//! [`AnalysisResult`] ready for the report layer.

use std::path::Path;

use chrono::Utc;
use stats_core::error::Result;
use stats_core::models::{DailyRecord, GlobalSummary, MonthlyAccumulator, PositionPolicy};
use tracing::{debug, info};

use crate::aggregator::PerformanceAggregator;
use crate::reader::load_rows;

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// CSV field delimiter.
    pub delimiter: u8,
    /// Handling of malformed non-empty positions.
    pub position_policy: PositionPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            position_policy: PositionPolicy::Lenient,
        }
    }
}

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// The export that was analysed.
    pub source: String,
    /// Number of data rows read (header excluded).
    pub rows_read: usize,
    /// Number of distinct months in the breakdown.
    pub months: usize,
    /// Rows left out of the monthly breakdown because of their date.
    pub undated_rows: usize,
    /// Rows whose malformed position was treated as unavailable.
    pub fallback_positions: usize,
    pub position_policy: PositionPolicy,
    /// Wall-clock seconds spent reading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_file`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub summary: GlobalSummary,
    /// Months in ascending key order.
    pub monthly: Vec<MonthlyAccumulator>,
    /// Every row in input order.
    pub daily: Vec<DailyRecord>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Read every row of `path` into memory.
/// 2. Aggregate them in a single pass.
/// 3. Return an [`AnalysisResult`].
///
/// Any failure to open or decode the file aborts before aggregation, so a
/// partial result is never produced.
pub fn analyze_file(path: &Path, options: &AnalysisOptions) -> Result<AnalysisResult> {
    // ── Step 1: Load rows ─────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let rows = load_rows(path, options.delimiter)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let aggregation = PerformanceAggregator::aggregate(&rows, options.position_policy)?;
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "Aggregated {} rows into {} months in {:.3}s (load {:.3}s)",
        rows.len(),
        aggregation.monthly.len(),
        aggregate_time,
        load_time
    );

    // ── Step 3: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: path.display().to_string(),
        rows_read: rows.len(),
        months: aggregation.monthly.len(),
        undated_rows: aggregation.undated_rows,
        fallback_positions: aggregation.fallback_positions,
        position_policy: options.position_policy,
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    info!(
        "Analysed {}: {} rows, {} clicks, {} impressions",
        metadata.source,
        metadata.rows_read,
        aggregation.summary.total_clicks,
        aggregation.summary.total_impressions
    );

    Ok(AnalysisResult {
        summary: aggregation.summary,
        monthly: aggregation.monthly,
        daily: aggregation.daily,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
