use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, StatsError};
use crate::models::PositionPolicy;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Summarise a search-performance CSV export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "search-stats",
    about = "Summarise a search-performance CSV export",
    version
)]
pub struct Settings {
    /// Path to the CSV export (columns: Fecha, Clics, Impresiones, CTR, Posición)
    pub input: PathBuf,

    /// Report format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Include every daily row in JSON output
    #[arg(long)]
    pub include_daily: bool,

    /// Field delimiter (single ASCII character)
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// How malformed non-empty positions are handled (lenient, strict)
    #[arg(long, default_value = "lenient")]
    pub position_policy: PositionPolicy,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(StatsError::Config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
