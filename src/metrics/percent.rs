//! Percentage formatting shared by every distribution view.

use super::MetricsError;

/// Sentinel rendered in place of a percentage that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format `count / total` as a one-decimal percentage string (`"42.5%"`).
///
/// Fails with [`MetricsError::DivisionByZero`] when `total` is zero, and
/// with [`MetricsError::NotFinite`] when either input is NaN or infinite.
pub fn format_percent(count: f64, total: f64) -> Result<String, MetricsError> {
    format_percent_with(count, total, 1)
}

/// [`format_percent`] with `decimals` digits after the point.
pub fn format_percent_with(
    count: f64,
    total: f64,
    decimals: usize,
) -> Result<String, MetricsError> {
    let value = percent_with(count, total, decimals)?;
    Ok(format!("{value:.decimals$}%"))
}

/// Raw percentage value, rounded to one decimal place.
pub fn percent(count: f64, total: f64) -> Result<f64, MetricsError> {
    percent_with(count, total, 1)
}

fn percent_with(count: f64, total: f64, decimals: usize) -> Result<f64, MetricsError> {
    if !count.is_finite() || !total.is_finite() {
        return Err(MetricsError::NotFinite);
    }
    if total == 0.0 {
        return Err(MetricsError::DivisionByZero);
    }

    let scale = 10f64.powi(decimals as i32);
    let raw = count / total * 100.0;
    Ok((raw * scale).round() / scale)
}

/// Like [`format_percent`] but returns [`NOT_AVAILABLE`] instead of failing.
pub fn percent_or_na(count: f64, total: f64) -> String {
    format_percent(count, total).unwrap_or_else(|_| NOT_AVAILABLE.to_string())
}

/// Integer convenience wrapper for counts coming off the wire.
pub fn percent_of(count: u64, total: u64) -> String {
    percent_of_with(count, total, 1)
}

/// [`percent_of`] with `decimals` digits after the point.
pub fn percent_of_with(count: u64, total: u64, decimals: usize) -> String {
    format_percent_with(count as f64, total as f64, decimals)
        .unwrap_or_else(|_| NOT_AVAILABLE.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
