use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to a `tracing` filter directive.
///
/// Unrecognised names are passed through so that full `EnvFilter` directives
/// such as `stats_data=debug` keep working.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr so the report on stdout stays clean, or are appended to
/// `log_file` when one is given. Falls back to `"warn"` if the level string
/// is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            registry.with(layer).try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_directive_maps_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("INFO"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("CRITICAL"), "error");
    }

    #[test]
    fn test_level_directive_passes_through_directives() {
        assert_eq!(level_directive("stats_data=debug"), "stats_data=debug");
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_setup_logging_writes_to_log_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("search-stats.log");

        setup_logging("INFO", Some(&path)).expect("setup_logging should succeed");
        tracing::info!("hello from the log test");

        let content = std::fs::read_to_string(&path).expect("log file must exist");
        assert!(content.contains("hello from the log test"));
    }

    #[test]
    fn test_setup_logging_unwritable_log_file_fails() {
        let tmp = TempDir::new().expect("tempdir");
        // A directory cannot be opened as a log file.
        let result = setup_logging("INFO", Some(&tmp.path().to_path_buf()));
        assert!(result.is_err());
    }
}
