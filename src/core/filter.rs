//! Filter message rows by date range and author.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Rows on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Rows on or before date |
//! | User | [`with_user`](FilterConfig::with_user) | Rows written by one user id |
//!
//! # Example
//!
//! ```
//! use chatstats::core::filter::{FilterConfig, apply_filters};
//! use chatstats::core::models::MessageTable;
//! use chatstats::MessageRow;
//!
//! # fn main() -> chatstats::Result<()> {
//! let table = MessageTable::from_rows(vec![
//!     MessageRow::new("U1", "old", "1704110400"), // 2024-01-01 12:00 UTC
//!     MessageRow::new("U1", "new", "1718452800"), // 2024-06-15 12:00 UTC
//!     MessageRow::new("U2", "other", "1718452800"),
//! ]);
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_user("U1");
//!
//! let filtered = apply_filters(table, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered.rows()[0].text(), Some("new"));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Rows whose `ts` doesn't parse are **excluded** when date filters are active
//! - User ids are matched exactly
//! - Multiple filters are combined with AND logic

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::core::models::MessageTable;
use crate::error::{ChatstatsError, Result};

/// Criteria a row must meet to be kept. All active filters must match.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only rows on or after this instant.
    pub after: Option<DateTime<Utc>>,

    /// Include only rows on or before this instant.
    pub before: Option<DateTime<Utc>>,

    /// Include only rows written by this user id.
    pub user: Option<String>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps rows from the start of `date` (UTC) on. Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date_at(date_str, NaiveTime::MIN)?);
        Ok(self)
    }

    /// Keeps rows up to the end of `date` (UTC). Format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(parse_date_at(date_str, end_of_day)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.user.is_some()
    }

    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }
}

fn parse_date_at(date_str: &str, time: NaiveTime) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ChatstatsError::invalid_date(date_str))?;
    Ok(date.and_time(time).and_utc())
}

/// Keeps the rows of `table` matching every active filter, in order.
pub fn apply_filters(table: MessageTable, config: &FilterConfig) -> MessageTable {
    if !config.is_active() {
        return table;
    }

    table
        .into_iter()
        .filter(|row| {
            if config.user.as_deref().is_some_and(|user| row.user() != Some(user)) {
                return false;
            }

            if config.has_date_filter() {
                let Some(ts) = row.timestamp() else {
                    return false;
                };
                if config.after.is_some_and(|after| ts < after) {
                    return false;
                }
                if config.before.is_some_and(|before| ts > before) {
                    return false;
                }
            }

            true
        })
        .collect()
}
