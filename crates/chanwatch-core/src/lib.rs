//! Chanwatch Core - Common infrastructure for API polling pipelines
//!
//! This crate provides the reusable pieces: remote error classification,
//! retry policy, the shared HTTP client, logging, progress and CSV output.

pub mod error;
pub mod http;
pub mod logging;
pub mod progress;
pub mod retry;
pub mod sink;

// Re-exports for convenience
pub use error::{ApiError, ApiErrorKind};
pub use http::{HttpConfig, SHARED_RUNTIME, get_json, http_client, set_http_config};
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{ProgressContext, fmt_num};
pub use retry::{Backoff, MAX_DELAY, RetryPolicy};
pub use sink::{CsvSink, cleanup_tmp_file};
