//! Machine-readable JSON report.

use serde::Serialize;
use stats_core::error::Result;
use stats_core::models::{DailyRecord, GlobalSummary};
use stats_data::analysis::{AnalysisMetadata, AnalysisResult};

/// One line of the monthly breakdown with its derived CTR.
#[derive(Debug, Serialize)]
struct MonthRow<'a> {
    month: &'a str,
    clicks: u64,
    impressions: u64,
    days: u32,
    ctr_percent: f64,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a GlobalSummary,
    monthly: Vec<MonthRow<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily: Option<&'a [DailyRecord]>,
    metadata: &'a AnalysisMetadata,
}

/// Render `result` as pretty-printed JSON.
///
/// Daily rows are only included when `include_daily` is set; exports can
/// span years of days.
pub fn render_json_report(result: &AnalysisResult, include_daily: bool) -> Result<String> {
    let report = JsonReport {
        summary: &result.summary,
        monthly: result
            .monthly
            .iter()
            .map(|m| MonthRow {
                month: &m.month,
                clicks: m.clicks,
                impressions: m.impressions,
                days: m.days,
                ctr_percent: m.ctr_percent(),
            })
            .collect(),
        daily: include_daily.then_some(result.daily.as_slice()),
        metadata: &result.metadata,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_result, sample_result};

    #[test]
    fn test_json_report_summary_and_months() {
        let json = render_json_report(&sample_result(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_clicks"], 35);
        assert_eq!(value["summary"]["total_impressions"], 350);
        assert_eq!(value["summary"]["peak_clicks_day"]["date"], "2026-02-01");
        assert_eq!(value["monthly"][0]["month"], "2026-01");
        assert_eq!(value["monthly"][1]["month"], "2026-02");
        assert!((value["monthly"][1]["ctr_percent"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert!(value.get("daily").is_none());
        assert_eq!(value["metadata"]["position_policy"], "lenient");
    }

    #[test]
    fn test_json_report_includes_daily_on_request() {
        let json = render_json_report(&sample_result(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let daily = value["daily"].as_array().unwrap();
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[1]["date"], "2026-01-02");
        assert_eq!(daily[1]["position"], 0.0);
    }

    #[test]
    fn test_json_report_empty_peaks_are_null() {
        let json = render_json_report(&empty_result(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["summary"]["peak_clicks_day"].is_null());
        assert!(value["monthly"].as_array().unwrap().is_empty());
    }
}
