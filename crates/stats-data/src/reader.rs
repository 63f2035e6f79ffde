//! CSV loading for search-performance exports.
//!
//! Reads the whole export into memory as [`RawRow`]s, looking columns up by
//! header name. No field is interpreted here; cleaning happens in the
//! aggregation pass.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use stats_core::error::{Result, StatsError};
use tracing::{debug, warn};

/// Header names every export must carry.
pub const DATE_COLUMN: &str = "Fecha";
pub const CLICKS_COLUMN: &str = "Clics";
pub const IMPRESSIONS_COLUMN: &str = "Impresiones";
pub const CTR_COLUMN: &str = "CTR";
pub const POSITION_COLUMN: &str = "Posición";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    DATE_COLUMN,
    CLICKS_COLUMN,
    IMPRESSIONS_COLUMN,
    CTR_COLUMN,
    POSITION_COLUMN,
];

// ── RawRow ────────────────────────────────────────────────────────────────────

/// One data row with its five fields still as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source (header is line 1).
    pub line: usize,
    pub date: String,
    pub clicks: String,
    pub impressions: String,
    pub ctr: String,
    pub position: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Open `path` and read every data row.
///
/// Fails when the file cannot be opened, is not valid UTF-8, has broken CSV
/// framing, or lacks one of [`REQUIRED_COLUMNS`].
pub fn load_rows(path: &Path, delimiter: u8) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = read_rows(file, delimiter)?;
    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read data rows from any reader. See [`load_rows`].
pub fn read_rows<R: Read>(input: R, delimiter: u8) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        warn!("Input has no header row; treating it as empty");
        return Ok(Vec::new());
    }

    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        // Header occupies line 1, so the first record falls back to line 2.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);
        rows.push(columns.extract(&record, line));
    }

    Ok(rows)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Field indices of the required columns.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date: usize,
    clicks: usize,
    impressions: usize,
    ctr: usize,
    position: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: lookup(DATE_COLUMN)?,
            clicks: lookup(CLICKS_COLUMN)?,
            impressions: lookup(IMPRESSIONS_COLUMN)?,
            ctr: lookup(CTR_COLUMN)?,
            position: lookup(POSITION_COLUMN)?,
        })
    }

    /// Short rows read the missing cells as empty strings.
    fn extract(&self, record: &StringRecord, line: usize) -> RawRow {
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        RawRow {
            line,
            date: field(self.date),
            clicks: field(self.clicks),
            impressions: field(self.impressions),
            ctr: field(self.ctr),
            position: field(self.position),
        }
    }
}

/// Spreadsheet exports often carry a UTF-8 BOM on the first header.
fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('\u{feff}').to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
