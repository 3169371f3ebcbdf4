//! Chanwatch YouTube - daily new-channel discovery
//!
//! Searches the YouTube Data API for channels created during one UTC
//! calendar day and writes their ids to a CSV file.
//!
//! # Example
//!
//! ```ignore
//! use chanwatch_core::ProgressContext;
//! use chanwatch_youtube::{Config, run};
//!
//! let config = Config::new(std::env::var("YOUTUBE_API_KEY")?);
//! let summary = run(&config, &ProgressContext::hidden())?;
//! println!("{} new channels on {}", summary.channels, summary.window.date);
//! ```

pub mod api;
pub mod config;
pub mod fetch;
pub mod runner;
pub mod schema;
pub mod sink;
pub mod window;

// Re-exports
pub use api::{SearchPage, SearchRequest, SearchSource, YouTubeClient};
pub use config::Config;
pub use fetch::{ChannelRecord, Completion, FetchOutcome, fetch_channel_ids};
pub use runner::{Summary, run, run_with_source};
pub use window::TimeWindow;
