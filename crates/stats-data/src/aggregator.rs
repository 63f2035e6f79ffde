//! Single-pass aggregation of daily search-performance rows.
//!
//! Folds every row into global totals, an impressions-weighted position and
//! a per-month breakdown, then derives the [`GlobalSummary`].

use std::collections::BTreeMap;

use stats_core::data_processors::{DateKey, FieldParser};
use stats_core::error::{Result, StatsError};
use stats_core::formatting::{percentage, ratio};
use stats_core::models::{
    add_count, DailyRecord, GlobalSummary, MonthlyAccumulator, PeakDay, PositionPolicy,
};
use tracing::{debug, warn};

use crate::reader::RawRow;

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Everything produced by one aggregation pass.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub summary: GlobalSummary,
    /// Months in ascending key order.
    pub monthly: Vec<MonthlyAccumulator>,
    /// Every row in input order.
    pub daily: Vec<DailyRecord>,
    /// Rows whose date did not parse and so are missing from `monthly`.
    pub undated_rows: usize,
    /// Rows whose malformed position was replaced by 0.0.
    pub fallback_positions: usize,
}

// ── PerformanceAggregator ─────────────────────────────────────────────────────

/// Running state of the aggregation pass.
#[derive(Debug)]
pub struct PerformanceAggregator {
    policy: PositionPolicy,
    total_clicks: u64,
    total_impressions: u64,
    weighted_position_sum: f64,
    weighted_impressions: u64,
    daily: Vec<DailyRecord>,
    // BTreeMap keeps the months sorted by key.
    months: BTreeMap<String, MonthlyAccumulator>,
    undated_rows: usize,
    fallback_positions: usize,
}

impl PerformanceAggregator {
    pub fn new(policy: PositionPolicy) -> Self {
        Self {
            policy,
            total_clicks: 0,
            total_impressions: 0,
            weighted_position_sum: 0.0,
            weighted_impressions: 0,
            daily: Vec::new(),
            months: BTreeMap::new(),
            undated_rows: 0,
            fallback_positions: 0,
        }
    }

    /// Run a whole pass over `rows`.
    pub fn aggregate(rows: &[RawRow], policy: PositionPolicy) -> Result<Aggregation> {
        let mut aggregator = Self::new(policy);
        for row in rows {
            aggregator.add_row(row)?;
        }
        Ok(aggregator.finish())
    }

    /// Clean one raw row and fold it in.
    ///
    /// Fails for a malformed position under [`PositionPolicy::Strict`], or
    /// when a running total would exceed `u64::MAX`.
    pub fn add_row(&mut self, row: &RawRow) -> Result<()> {
        let position = match FieldParser::parse_position(&row.position) {
            Some(position) => position,
            None => match self.policy {
                PositionPolicy::Strict => {
                    return Err(StatsError::InvalidPosition {
                        line: row.line,
                        value: row.position.clone(),
                    });
                }
                PositionPolicy::Lenient => {
                    warn!(
                        "Line {}: unparseable position {:?}, treating as unavailable",
                        row.line, row.position
                    );
                    self.fallback_positions += 1;
                    0.0
                }
            },
        };

        let clicks = FieldParser::parse_count(&row.clicks);
        let impressions = FieldParser::parse_count(&row.impressions);

        self.add_record(DailyRecord {
            line: row.line,
            date: row.date.clone(),
            clicks,
            impressions,
            ctr: ratio(clicks as f64, impressions as f64),
            reported_ctr: FieldParser::parse_decimal(&row.ctr),
            position,
        })
    }

    /// Fold an already-cleaned record into the totals and its month.
    ///
    /// On overflow nothing is updated.
    pub fn add_record(&mut self, record: DailyRecord) -> Result<()> {
        let line = record.line;
        let total_clicks = add_count(self.total_clicks, record.clicks, line, "clicks")?;
        let total_impressions =
            add_count(self.total_impressions, record.impressions, line, "impressions")?;
        let weighted_impressions = if record.has_position() {
            add_count(self.weighted_impressions, record.impressions, line, "impressions")?
        } else {
            self.weighted_impressions
        };

        // Cannot fail once the global sums fit.
        match DateKey::month_key(&record.date) {
            Some(month) => self
                .months
                .entry(month.clone())
                .or_insert_with(|| MonthlyAccumulator::new(month))
                .add_record(&record)?,
            None => {
                debug!(
                    "Line {}: date {:?} is not YYYY-MM-DD, skipping monthly breakdown",
                    record.line, record.date
                );
                self.undated_rows += 1;
            }
        }

        self.total_clicks = total_clicks;
        self.total_impressions = total_impressions;
        if record.has_position() {
            self.weighted_position_sum += record.position * record.impressions as f64;
            self.weighted_impressions = weighted_impressions;
        }

        self.daily.push(record);
        Ok(())
    }

    /// Derive the summary and hand back every accumulated figure.
    pub fn finish(self) -> Aggregation {
        let summary = GlobalSummary {
            total_clicks: self.total_clicks,
            total_impressions: self.total_impressions,
            average_ctr: percentage(self.total_clicks as f64, self.total_impressions as f64),
            average_position: ratio(self.weighted_position_sum, self.weighted_impressions as f64),
            peak_clicks_day: peak_by(&self.daily, |r| r.clicks),
            peak_impressions_day: peak_by(&self.daily, |r| r.impressions),
        };

        if self.undated_rows > 0 {
            warn!(
                "{} rows had an unparseable date and were left out of the monthly breakdown",
                self.undated_rows
            );
        }

        Aggregation {
            summary,
            monthly: self.months.into_values().collect(),
            daily: self.daily,
            undated_rows: self.undated_rows,
            fallback_positions: self.fallback_positions,
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// The record with the highest `key`; the earliest one wins a tie.
fn peak_by(records: &[DailyRecord], key: impl Fn(&DailyRecord) -> u64) -> Option<PeakDay> {
    let mut best: Option<(&DailyRecord, u64)> = None;
    for record in records {
        let value = key(record);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((record, value)),
        }
    }
    best.map(|(record, value)| PeakDay::from_record(record, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
