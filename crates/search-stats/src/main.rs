mod bootstrap;

use anyhow::Result;
use stats_core::settings::Settings;
use stats_data::analysis::{analyze_file, AnalysisOptions};
use stats_report::json_view::render_json_report;
use stats_report::text_view::render_text_report;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("search-stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Format: {}, Position policy: {:?}",
        settings.input.display(),
        settings.format,
        settings.position_policy
    );

    let report = run(&settings)?;
    print!("{report}");

    Ok(())
}

/// Analyse the configured export and render the requested report.
///
/// Nothing is printed here, so a failure never leaves a partial report on
/// stdout.
fn run(settings: &Settings) -> Result<String> {
    let options = AnalysisOptions {
        delimiter: settings.delimiter_byte()?,
        position_policy: settings.position_policy,
    };

    let result = analyze_file(&settings.input, &options)?;

    if settings.is_json() {
        let mut json = render_json_report(&result, settings.include_daily)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(render_text_report(&result))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_export(dir: &Path, body: &str) -> String {
        let path = dir.join("export.csv");
        std::fs::write(&path, body).expect("write export");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_run_text_report() {
        let tmp = TempDir::new().expect("tempdir");
        let input = write_export(
            tmp.path(),
            "Fecha,Clics,Impresiones,CTR,Posición\n\
             2026-02-01,20,200,2%,3.0\n\
             2026-01-01,10,100,2%,5.5\n\
             2026-01-02,abc,50,1%,\n",
        );

        let settings = Settings::load_from_args(["search-stats", input.as_str()]);
        let report = run(&settings).expect("run should succeed");

        assert!(report.starts_with("--- ANALYSIS RESULT ---\n"));
        assert!(report.contains("Total Clicks: 30\n"));
        assert!(report.contains("Total Impressions: 350\n"));
        assert!(report.contains("Peak Clicks: 20 on 2026-02-01\n"));
        assert!(report.ends_with("2026-01,10,150,6.67%\n2026-02,20,200,10.00%\n"));
    }

    #[test]
    fn test_run_json_report() {
        let tmp = TempDir::new().expect("tempdir");
        let input = write_export(
            tmp.path(),
            "Fecha,Clics,Impresiones,CTR,Posición\n2026-01-01,1,10,10%,2\n",
        );

        let settings =
            Settings::load_from_args(["search-stats", "--format", "json", input.as_str()]);
        let report = run(&settings).expect("run should succeed");
        let value: serde_json::Value = serde_json::from_str(&report).expect("valid json");

        assert_eq!(value["summary"]["total_clicks"], 1);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn test_run_missing_file_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope.csv").to_string_lossy().to_string();
        let settings = Settings::load_from_args(["search-stats", missing.as_str()]);

        let err = run(&settings).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_run_strict_policy_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let input = write_export(
            tmp.path(),
            "Fecha,Clics,Impresiones,CTR,Posición\n2026-01-01,1,10,10%,abc\n",
        );

        let settings = Settings::load_from_args([
            "search-stats",
            "--position-policy",
            "strict",
            input.as_str(),
        ]);

        let err = run(&settings).unwrap_err();
        assert!(err.to_string().contains("Invalid position"));
    }
}
