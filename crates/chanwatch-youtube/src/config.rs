//! Runtime configuration for a discovery run

use std::path::PathBuf;

use chanwatch_core::RetryPolicy;
use chrono::NaiveDate;

use crate::api::{DEFAULT_API_URL, MAX_PAGE_SIZE};
use crate::window::TimeWindow;

/// Furthest back a day offset may reach (about a century)
pub const MAX_DAYS_AGO: u32 = 36_500;

/// Everything a run needs, with no implicit reads of the process environment
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    /// API base URL (without `/search`)
    pub api_url: String,
    /// CSV output path
    pub output_path: PathBuf,
    /// Day offset from today (UTC), ignored when `date` is set
    pub days_ago: u32,
    /// Explicit calendar day to search
    pub date: Option<NaiveDate>,
    /// `maxResults` per page, 1..=50
    pub page_size: u32,
    pub retry: RetryPolicy,
}

impl Config {
    /// Defaults with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            output_path: PathBuf::from("newchannels.csv"),
            days_ago: 1,
            date: None,
            page_size: MAX_PAGE_SIZE,
            retry: RetryPolicy::default(),
        }
    }

    /// The day to search
    pub fn window(&self) -> TimeWindow {
        match self.date {
            Some(date) => TimeWindow::for_date(date),
            None => TimeWindow::days_ago(self.days_ago),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.api_key.trim().is_empty(), "API key is empty");
        anyhow::ensure!(
            (1..=MAX_PAGE_SIZE).contains(&self.page_size),
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            self.page_size
        );
        anyhow::ensure!(
            self.days_ago <= MAX_DAYS_AGO,
            "days ago must be at most {MAX_DAYS_AGO}, got {}",
            self.days_ago
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("key");
        assert_eq!(config.output_path, PathBuf::from("newchannels.csv"));
        assert_eq!(config.days_ago, 1);
        assert_eq!(config.page_size, 50);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.delay, Duration::from_secs(5));
        assert!(config.api_url.starts_with("https://"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_date_wins() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = Config {
            date: Some(date),
            days_ago: 7,
            ..Config::new("key")
        };
        assert_eq!(config.window().start, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn empty_key_rejected() {
        assert!(Config::new("  ").validate().is_err());
    }

    #[test]
    fn days_ago_bounds() {
        let far = Config {
            days_ago: u32::MAX,
            ..Config::new("key")
        };
        assert!(far.validate().is_err());

        let edge = Config {
            days_ago: MAX_DAYS_AGO,
            ..Config::new("key")
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn page_size_bounds() {
        for bad in [0, 51] {
            let config = Config {
                page_size: bad,
                ..Config::new("key")
            };
            assert!(config.validate().is_err(), "page_size={bad}");
        }
    }
}
