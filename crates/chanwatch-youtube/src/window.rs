//! UTC calendar-day search window

use chrono::{DateTime, Days, NaiveDate, Utc};

/// One UTC calendar day, formatted as the API's published-after/before bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub date: NaiveDate,
    /// `YYYY-MM-DDT00:00:00Z`
    pub start: String,
    /// `YYYY-MM-DDT23:59:59Z`
    pub end: String,
}

impl TimeWindow {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            start: date.format("%Y-%m-%dT00:00:00Z").to_string(),
            end: date.format("%Y-%m-%dT23:59:59Z").to_string(),
        }
    }

    /// The day `offset` days before today (UTC). `offset = 1` is yesterday.
    pub fn days_ago(offset: u32) -> Self {
        Self::days_ago_from(Utc::now(), offset)
    }

    pub fn days_ago_from(now: DateTime<Utc>, offset: u32) -> Self {
        let today = now.date_naive();
        let date = today
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN);
        Self::for_date(date)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}
