use serde::{Deserialize, Serialize};

use crate::error::{self, StatsError};
use crate::formatting::percentage;

/// Add `value` to a running `total`, failing instead of wrapping.
pub fn add_count(total: u64, value: u64, line: usize, column: &'static str) -> error::Result<u64> {
    total
        .checked_add(value)
        .ok_or(StatsError::CountOverflow { line, column })
}

/// How a non-empty `Posición` value that fails to parse is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionPolicy {
    /// Substitute the 0.0 "unavailable" sentinel and keep going.
    #[default]
    Lenient,
    /// Abort the run with [`crate::error::StatsError::InvalidPosition`].
    Strict,
}

impl std::str::FromStr for PositionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown position policy: {other}")),
        }
    }
}

/// One row of the search-performance export, after field cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// 1-based line number in the source file (header is line 1).
    pub line: usize,
    /// Raw `Fecha` value, expected as `YYYY-MM-DD`.
    pub date: String,
    pub clicks: u64,
    pub impressions: u64,
    /// `clicks / impressions`, or 0.0 when there were no impressions.
    pub ctr: f64,
    /// The export's own `CTR` column as a percentage number. Informational.
    pub reported_ctr: f64,
    /// Average ranking position; 0.0 means unavailable.
    pub position: f64,
}

impl DailyRecord {
    /// Whether this row may contribute to the weighted average position.
    pub fn has_position(&self) -> bool {
        self.impressions > 0 && self.position > 0.0
    }
}

/// Running click/impression totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAccumulator {
    /// Month key, `YYYY-MM`.
    pub month: String,
    pub clicks: u64,
    pub impressions: u64,
    /// Number of rows folded into this month.
    pub days: u32,
}

impl MonthlyAccumulator {
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
            clicks: 0,
            impressions: 0,
            days: 0,
        }
    }

    /// Fold a single row into the month.
    pub fn add_record(&mut self, record: &DailyRecord) -> error::Result<()> {
        let clicks = add_count(self.clicks, record.clicks, record.line, "clicks")?;
        let impressions = add_count(self.impressions, record.impressions, record.line, "impressions")?;
        self.clicks = clicks;
        self.impressions = impressions;
        self.days += 1;
        Ok(())
    }

    /// Month CTR as a percentage, 0.0 without impressions.
    pub fn ctr_percent(&self) -> f64 {
        percentage(self.clicks as f64, self.impressions as f64)
    }
}

/// The day a peak value was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakDay {
    pub date: String,
    pub value: u64,
}

impl PeakDay {
    pub fn from_record(record: &DailyRecord, value: u64) -> Self {
        Self {
            date: record.date.clone(),
            value,
        }
    }
}

/// Global figures derived once all rows have been processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_clicks: u64,
    pub total_impressions: u64,
    /// Overall CTR as a percentage.
    pub average_ctr: f64,
    /// Impressions-weighted mean position over rows with a valid position.
    pub average_position: f64,
    pub peak_clicks_day: Option<PeakDay>,
    pub peak_impressions_day: Option<PeakDay>,
}
