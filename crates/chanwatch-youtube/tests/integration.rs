//! Integration tests for chanwatch-youtube
//!
//! These tests hit the live YouTube Data API, spend quota, and need
//! `YOUTUBE_API_KEY`. They are marked #[ignore] by default.
//! Run with: cargo test -p chanwatch-youtube --test integration -- --ignored

use chanwatch_core::{ProgressContext, RetryPolicy};
use chanwatch_youtube::{Config, SearchRequest, SearchSource, TimeWindow, YouTubeClient};
use tempfile::TempDir;

fn api_key() -> String {
    std::env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY must be set for integration tests")
}

/// Fetch one small page of yesterday's channels
/// Run with: cargo test -p chanwatch-youtube --test integration -- --ignored single_page
#[test]
#[ignore]
fn single_page() {
    let mut client = YouTubeClient::new(chanwatch_youtube::api::DEFAULT_API_URL, &api_key());
    let request = SearchRequest::new(&TimeWindow::days_ago(1), 5, None);

    let page = client.search(&request).expect("search should succeed");

    assert!(page.items.len() <= 5);
    for item in &page.items {
        let id = item.id.channel_id.as_deref().expect("channel result");
        assert!(id.starts_with("UC"), "unexpected channel id {id}");
    }
}

/// A bad key is a non-retryable error, not a panic
/// Run with: cargo test -p chanwatch-youtube --test integration -- --ignored bad_key
#[test]
#[ignore]
fn bad_key() {
    let mut client =
        YouTubeClient::new(chanwatch_youtube::api::DEFAULT_API_URL, "not-a-real-key");
    let request = SearchRequest::new(&TimeWindow::days_ago(1), 1, None);

    let err = client.search(&request).expect_err("bad key must fail");
    assert!(!err.is_retryable(), "unexpected retryable error: {err}");
}

/// Full run into a temp dir
/// Run with: cargo test -p chanwatch-youtube --test integration -- --ignored full_run
#[test]
#[ignore]
fn full_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = Config {
        output_path: temp_dir.path().join("newchannels.csv"),
        retry: RetryPolicy {
            max_retries: 1,
            ..Default::default()
        },
        ..Config::new(api_key())
    };

    let summary =
        chanwatch_youtube::run(&config, &ProgressContext::hidden()).expect("run should succeed");

    if summary.channels > 0 {
        let content = std::fs::read_to_string(&config.output_path).unwrap();
        assert_eq!(content.lines().next(), Some("channelid"));
        assert_eq!(content.lines().count(), summary.channels + 1);
    } else {
        assert!(!config.output_path.exists());
    }
}
