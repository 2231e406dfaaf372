//! Timestamp helpers.
//!
//! Message timestamps in channel exports are unix seconds encoded as
//! strings with a microsecond suffix, e.g. `"1705314600.000200"`.

use chrono::{DateTime, Utc};

use crate::error::{ChatstatsError, Result};

/// Display format used for converted timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a unix-seconds string (fractional part allowed) to a UTC datetime.
///
/// Returns `None` for anything that isn't a finite number in range.
pub fn parse_unix_ts(ts: &str) -> Option<DateTime<Utc>> {
    let trimmed = ts.trim();
    let (secs, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let secs: i64 = secs.parse().ok()?;

    let nanos = if frac.is_empty() {
        0
    } else {
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // Keep at most nanosecond precision, right-pad the rest
        let digits: String = frac.chars().take(9).collect();
        format!("{digits:0<9}").parse::<u32>().ok()?
    };

    DateTime::from_timestamp(secs, nanos)
}

/// Converts a unix-seconds string to `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// A literal zero is passed through as `"0"`: exports use it for "never".
///
/// # Example
///
/// ```rust
/// use chatstats::time::format_unix_ts;
///
/// assert_eq!(format_unix_ts("1705314600.000200").unwrap(), "2024-01-15 10:30:00");
/// assert_eq!(format_unix_ts("0").unwrap(), "0");
/// ```
pub fn format_unix_ts(ts: &str) -> Result<String> {
    if ts.trim().parse::<f64>().is_ok_and(|v| v == 0.0) {
        return Ok("0".to_string());
    }
    parse_unix_ts(ts)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .ok_or_else(|| ChatstatsError::invalid_timestamp(ts))
}

/// Converts a whole column of timestamps, failing on the first bad value.
pub fn convert_timestamps<'a, I>(values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    values.into_iter().map(format_unix_ts).collect()
}

/// Splits combined week pairs into the weeks counted forward and backward.
///
/// For each pair the earlier week goes to the first list and the later one to
/// the second. When both are equal the second element lands in the first list.
///
/// ```rust
/// use chatstats::time::break_combined_weeks;
///
/// let (plus_one, minus_one) = break_combined_weeks(&[(3, 4), (9, 8)]);
/// assert_eq!(plus_one, vec![3, 8]);
/// assert_eq!(minus_one, vec![4, 9]);
/// ```
pub fn break_combined_weeks<T: PartialOrd + Copy>(combined: &[(T, T)]) -> (Vec<T>, Vec<T>) {
    let mut plus_one = Vec::with_capacity(combined.len());
    let mut minus_one = Vec::with_capacity(combined.len());

    for &(a, b) in combined {
        if a < b {
            plus_one.push(a);
            minus_one.push(b);
        } else {
            minus_one.push(a);
            plus_one.push(b);
        }
    }

    (plus_one, minus_one)
}
