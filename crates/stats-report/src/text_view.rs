//! Plain-text report: global figures followed by the monthly breakdown.

use stats_core::formatting::{format_fixed, format_percent};
use stats_core::models::{GlobalSummary, MonthlyAccumulator};
use stats_data::analysis::AnalysisResult;

/// Render the full text report for `result`.
///
/// Peak lines are omitted when the export had no rows.
pub fn render_text_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    render_summary(&mut out, &result.summary);
    out.push('\n');
    render_monthly(&mut out, &result.monthly);
    out
}

fn render_summary(out: &mut String, summary: &GlobalSummary) {
    out.push_str(&format!(
        "--- ANALYSIS RESULT ---\n\
         Total Clicks: {}\n\
         Total Impressions: {}\n\
         Average CTR: {}\n\
         Average Position: {}\n",
        summary.total_clicks,
        summary.total_impressions,
        format_percent(summary.average_ctr),
        format_fixed(summary.average_position, 2),
    ));

    if let Some(peak) = &summary.peak_clicks_day {
        out.push_str(&format!("Peak Clicks: {} on {}\n", peak.value, peak.date));
    }
    if let Some(peak) = &summary.peak_impressions_day {
        out.push_str(&format!("Peak Impressions: {} on {}\n", peak.value, peak.date));
    }
}

fn render_monthly(out: &mut String, months: &[MonthlyAccumulator]) {
    out.push_str("--- MONTHLY BREAKDOWN ---\n");
    out.push_str("Month,Clicks,Impressions,CTR\n");
    for month in months {
        out.push_str(&format!(
            "{},{},{},{}\n",
            month.month,
            month.clicks,
            month.impressions,
            format_percent(month.ctr_percent())
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_result, sample_result};

    #[test]
    fn test_render_sample_report() {
        let text = render_text_report(&sample_result());

        let expected = "\
--- ANALYSIS RESULT ---
Total Clicks: 35
Total Impressions: 350
Average CTR: 10.00%
Average Position: 3.83
Peak Clicks: 20 on 2026-02-01
Peak Impressions: 200 on 2026-02-01

--- MONTHLY BREAKDOWN ---
Month,Clicks,Impressions,CTR
2026-01,15,150,10.00%
2026-02,20,200,10.00%
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_report_has_no_peaks() {
        let text = render_text_report(&empty_result());

        assert!(text.contains("Total Clicks: 0\n"));
        assert!(text.contains("Average CTR: 0.00%\n"));
        assert!(text.contains("Average Position: 0.00\n"));
        assert!(!text.contains("Peak"));
        assert!(text.ends_with("Month,Clicks,Impressions,CTR\n"));
    }

    #[test]
    fn test_render_month_without_impressions() {
        let mut result = empty_result();
        result.monthly.push(MonthlyAccumulator {
            month: "2026-07".to_string(),
            clicks: 4,
            impressions: 0,
            days: 1,
        });

        let text = render_text_report(&result);
        assert!(text.contains("2026-07,4,0,0.00%\n"));
    }
}
