use stats_core::models::PositionPolicy;
use stats_data::aggregator::{Aggregation, PerformanceAggregator};
use stats_data::analysis::{AnalysisMetadata, AnalysisResult};
use stats_data::reader::RawRow;

fn row(line: usize, date: &str, clicks: &str, impressions: &str, ctr: &str, position: &str) -> RawRow {
    RawRow {
        line,
        date: date.to_string(),
        clicks: clicks.to_string(),
        impressions: impressions.to_string(),
        ctr: ctr.to_string(),
        position: position.to_string(),
    }
}

fn into_result(aggregation: Aggregation) -> AnalysisResult {
    let metadata = AnalysisMetadata {
        generated_at: "2026-02-08T00:00:00+00:00".to_string(),
        source: "export.csv".to_string(),
        rows_read: aggregation.daily.len(),
        months: aggregation.monthly.len(),
        undated_rows: aggregation.undated_rows,
        fallback_positions: aggregation.fallback_positions,
        position_policy: PositionPolicy::Lenient,
        load_time_seconds: 0.0,
        aggregate_time_seconds: 0.0,
    };
    AnalysisResult {
        summary: aggregation.summary,
        monthly: aggregation.monthly,
        daily: aggregation.daily,
        metadata,
    }
}

/// Three days over two months.
pub fn sample_result() -> AnalysisResult {
    let rows = vec![
        row(2, "2026-01-01", "10", "100", "2%", "5.5"),
        row(3, "2026-01-02", "5", "50", "1%", ""),
        row(4, "2026-02-01", "20", "200", "2%", "3.0"),
    ];
    into_result(PerformanceAggregator::aggregate(&rows, PositionPolicy::Lenient).unwrap())
}

/// Header-only export.
pub fn empty_result() -> AnalysisResult {
    into_result(PerformanceAggregator::new(PositionPolicy::Lenient).finish())
}
