//! Main runner: window → paginated search → CSV

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chanwatch_core::{ProgressContext, fmt_num};

use crate::api::{SearchSource, YouTubeClient};
use crate::config::Config;
use crate::fetch::{Completion, fetch_channel_ids};
use crate::sink::{print_preview, save_channels};
use crate::window::TimeWindow;

/// Run summary
#[derive(Debug)]
pub struct Summary {
    pub window: TimeWindow,
    pub channels: usize,
    pub pages: usize,
    pub retries: u32,
    pub completion: Completion,
    /// Written file, `None` when no channels were found
    pub output: Option<PathBuf>,
    pub elapsed: Duration,
}

impl Summary {
    pub fn is_complete(&self) -> bool {
        matches!(self.completion, Completion::Complete)
    }
}

/// Run against the live YouTube API
pub fn run(config: &Config, progress: &ProgressContext) -> Result<Summary> {
    config.validate()?;
    let mut client = YouTubeClient::new(&config.api_url, &config.api_key);
    run_with_source(config, &mut client, progress)
}

/// Run against any search source
pub fn run_with_source<S: SearchSource>(
    config: &Config,
    source: &mut S,
    progress: &ProgressContext,
) -> Result<Summary> {
    let start = Instant::now();
    let window = config.window();
    log::info!("Searching channels created {window}");

    let pb = progress.stage_line("search");
    let outcome = fetch_channel_ids(source, &window, config.page_size, &config.retry, &pb);
    pb.finish_and_clear();

    if let Completion::Partial { error } = &outcome.completion {
        log::warn!(
            "Search stopped after {} pages ({}); {} channels collected, results are partial",
            outcome.pages,
            error.kind,
            fmt_num(outcome.records.len())
        );
    }

    let output = match save_channels(&outcome.records, &config.output_path)? {
        Some(_) => {
            print_preview(&outcome.records);
            Some(config.output_path.clone())
        }
        None => None,
    };

    let summary = Summary {
        window,
        channels: outcome.records.len(),
        pages: outcome.pages,
        retries: outcome.retries,
        completion: outcome.completion,
        output,
        elapsed: start.elapsed(),
    };

    log::info!("=== Channel Search Summary ===");
    log::info!("Day: {}", summary.window.date);
    log::info!(
        "Channels: {} ({} pages, {} retries)",
        fmt_num(summary.channels),
        summary.pages,
        summary.retries
    );
    log::info!("Time: {:.1}s", summary.elapsed.as_secs_f64());

    Ok(summary)
}
