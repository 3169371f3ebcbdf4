//! Paginated channel search with bounded retry
//!
//! Walks continuation tokens until the API stops returning one. Remote
//! failures are retried per [`RetryPolicy`] against a budget shared by the
//! whole run; once a call fails for good, pagination stops and whatever was
//! collected so far is returned as a [`Completion::Partial`] outcome.

use std::time::Duration;

use chanwatch_core::{ApiError, RetryPolicy, fmt_num};
use indicatif::ProgressBar;

use crate::api::{SearchRequest, SearchSource};
use crate::window::TimeWindow;

/// One discovered channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub channel_id: String,
}

/// Whether pagination ran to the last page
#[derive(Debug, Clone)]
pub enum Completion {
    Complete,
    /// Stopped early; records hold every page fetched before `error`
    Partial { error: ApiError },
}

/// Result of a search run: records in page-then-item order
#[derive(Debug)]
pub struct FetchOutcome {
    pub records: Vec<ChannelRecord>,
    /// Pages successfully fetched
    pub pages: usize,
    /// Retries spent from the budget
    pub retries: u32,
    pub completion: Completion,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Complete)
    }
}

/// Fetch all channel ids created inside `window`, sleeping between retries.
pub fn fetch_channel_ids<S: SearchSource>(
    source: &mut S,
    window: &TimeWindow,
    page_size: u32,
    policy: &RetryPolicy,
    pb: &ProgressBar,
) -> FetchOutcome {
    fetch_channel_ids_with(source, window, page_size, policy, pb, std::thread::sleep)
}

/// Same as [`fetch_channel_ids`] with a caller-supplied sleep.
pub fn fetch_channel_ids_with<S: SearchSource>(
    source: &mut S,
    window: &TimeWindow,
    page_size: u32,
    policy: &RetryPolicy,
    pb: &ProgressBar,
    mut sleep: impl FnMut(Duration),
) -> FetchOutcome {
    let mut records = Vec::new();
    let mut pages = 0usize;
    let mut retries = 0u32;
    let mut page_token: Option<String> = None;

    loop {
        let request = SearchRequest::new(window, page_size, page_token.take());
        match source.search(&request) {
            Ok(page) => {
                pages += 1;
                let before = records.len();
                for item in &page.items {
                    match &item.id.channel_id {
                        Some(id) => records.push(ChannelRecord {
                            channel_id: id.clone(),
                        }),
                        None => log::warn!(
                            "page {pages}: skipping result without channelId (kind {})",
                            item.id.kind.as_deref().unwrap_or("?")
                        ),
                    }
                }
                log::debug!(
                    "page {pages}: {} channels ({} total)",
                    records.len() - before,
                    records.len()
                );
                pb.set_message(format!(
                    "page {pages}, {} channels",
                    fmt_num(records.len())
                ));

                match page.continuation() {
                    Some(token) => page_token = Some(token.to_string()),
                    None => {
                        return FetchOutcome {
                            records,
                            pages,
                            retries,
                            completion: Completion::Complete,
                        };
                    }
                }
            }
            Err(error) => match policy.next_delay(error.kind, retries) {
                Some(delay) => {
                    retries += 1;
                    log::warn!(
                        "page {}: {error}, retry {retries}/{} in {delay:?}",
                        pages + 1,
                        policy.max_retries
                    );
                    pb.set_message(format!("retry {retries}/{}...", policy.max_retries));
                    sleep(delay);
                    // Same page again
                    page_token = request.page_token;
                }
                None => {
                    if error.is_retryable() {
                        log::error!("page {}: failed after {retries} retries: {error}", pages + 1);
                    } else {
                        log::error!("page {}: {} error, not retrying: {error}", pages + 1, error.kind);
                    }
                    return FetchOutcome {
                        records,
                        pages,
                        retries,
                        completion: Completion::Partial { error },
                    };
                }
            },
        }
    }
}
