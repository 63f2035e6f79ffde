/// Calculate `(part / whole) * 100`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use stats_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Calculate `part / whole`, or `0.0` when `whole` is zero.
pub fn ratio(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part / whole
}

/// Format a number with a fixed number of decimal places and no grouping.
///
/// # Examples
///
/// ```
/// use stats_core::formatting::format_fixed;
///
/// assert_eq!(format_fixed(3.8333, 2), "3.83");
/// assert_eq!(format_fixed(0.0, 2), "0.00");
/// ```
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.prec$}", value, prec = decimals)
}

/// Format an already-scaled percentage value as `"x.xx%"`.
///
/// # Examples
///
/// ```
/// use stats_core::formatting::format_percent;
///
/// assert_eq!(format_percent(10.0), "10.00%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_fixed(value, 2))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
