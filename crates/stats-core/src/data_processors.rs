use chrono::NaiveDate;

// ── FieldParser ───────────────────────────────────────────────────────────────

/// Cleans the string fields of a search-performance export.
///
/// Failed parses deliberately collapse to zero: exports routinely contain
/// blanks, `"-"` placeholders and localised decimals, and a single dirty cell
/// must not drop the whole day from the totals.
pub struct FieldParser;

impl FieldParser {
    /// Parse a base-10 count such as `Clics` or `Impresiones`.
    ///
    /// Anything that is not a non-negative integer yields `0`.
    pub fn parse_count(raw: &str) -> u64 {
        raw.trim().parse::<u64>().unwrap_or(0)
    }

    /// Parse a decimal or percentage such as `"2,5%"`.
    ///
    /// `%` is stripped and `,` is read as the decimal separator. Anything
    /// unparseable yields `0.0`.
    pub fn parse_decimal(raw: &str) -> f64 {
        Self::try_parse_decimal(raw).unwrap_or(0.0)
    }

    /// Parse a `Posición` cell.
    ///
    /// * empty → `Some(0.0)`, the "unavailable" sentinel
    /// * valid decimal → `Some(value)`
    /// * anything else → `None`, left to the caller's position policy
    pub fn parse_position(raw: &str) -> Option<f64> {
        if raw.trim().is_empty() {
            return Some(0.0);
        }
        Self::try_parse_decimal(raw)
    }

    fn try_parse_decimal(raw: &str) -> Option<f64> {
        let normalised = raw.trim().replace('%', "").replace(',', ".");
        normalised.trim().parse::<f64>().ok()
    }
}

// ── DateKey ───────────────────────────────────────────────────────────────────

/// Derives period keys from `Fecha` values.
pub struct DateKey;

impl DateKey {
    /// Parse a `YYYY-MM-DD` date.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
    }

    /// Month key `YYYY-MM` for a `YYYY-MM-DD` date, `None` if the date is invalid.
    pub fn month_key(raw: &str) -> Option<String> {
        Self::parse(raw).map(|date| date.format("%Y-%m").to_string())
    }
}
