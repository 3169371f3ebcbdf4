//! Default command: search one day's new channels and write the CSV

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chanwatch_core::{ProgressContext, RetryPolicy, fmt_num};
use chanwatch_youtube::{Completion, Summary};
use chrono::NaiveDate;
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Search the day this many days before today, UTC (default: 1 = yesterday)
    #[arg(long)]
    pub days_ago: Option<u32>,

    /// Search an explicit UTC day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, conflicts_with = "days_ago")]
    pub date: Option<NaiveDate>,

    /// Output CSV path (default: newchannels.csv)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Retry budget for failed API calls, shared by the whole run
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Results per page (1-50)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub page_size: Option<u32>,

    /// Exit non-zero when pagination stopped early
    #[arg(long)]
    pub strict: bool,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date format: {e}"))
}

/// Merge file config and CLI overrides into the runtime config.
///
/// Fails before any network activity when no API key is configured.
pub fn resolve(args: &SearchArgs, config: &Config) -> Result<chanwatch_youtube::Config> {
    let api_key = config.require_api_key()?;
    Ok(chanwatch_youtube::Config {
        api_key: api_key.to_string(),
        api_url: config.youtube.api_url.clone(),
        output_path: args
            .output
            .clone()
            .unwrap_or_else(|| config.output.path.clone()),
        days_ago: args.days_ago.unwrap_or(config.window.days_ago),
        date: args.date,
        page_size: args.page_size.unwrap_or(config.youtube.page_size),
        retry: RetryPolicy {
            max_retries: args.max_retries.unwrap_or(config.retry.max_retries),
            delay: Duration::from_secs(config.retry.delay_secs),
            max_delay: Duration::from_secs(config.retry.max_delay_secs),
        },
    })
}

pub fn run(args: SearchArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let run_config = resolve(&args, config)?;
    let summary = chanwatch_youtube::run(&run_config, progress)?;
    print_summary(&summary);

    if args.strict {
        if let Completion::Partial { error } = &summary.completion {
            anyhow::bail!(
                "search incomplete after {} pages: {error}",
                summary.pages
            );
        }
    }
    Ok(())
}

/// Print a key-value summary table on stderr
fn print_summary(summary: &Summary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Channel search").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let status = match &summary.completion {
        Completion::Complete => Cell::new("complete").fg(Color::Green),
        Completion::Partial { error } => {
            Cell::new(format!("partial ({})", error.kind)).fg(Color::Yellow)
        }
    };
    let output = summary
        .output
        .as_ref()
        .map_or_else(|| "(not written)".to_string(), |p| p.display().to_string());

    table.add_row(vec![Cell::new("Day"), Cell::new(summary.window.date)]);
    table.add_row(vec![Cell::new("Channels"), Cell::new(fmt_num(summary.channels))]);
    table.add_row(vec![Cell::new("Pages"), Cell::new(summary.pages)]);
    table.add_row(vec![Cell::new("Retries"), Cell::new(summary.retries)]);
    table.add_row(vec![Cell::new("Status"), status]);
    table.add_row(vec![Cell::new("Output"), Cell::new(output)]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format!("{:.1}s", summary.elapsed.as_secs_f64())),
    ]);
    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.youtube.api_key = Some("key".to_string());
        config
    }

    #[test]
    fn parse_date_valid() {
        assert_eq!(
            parse_date("2024-01-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("01/01/2024").is_err());
    }

    #[test]
    fn resolve_defaults() {
        let run_config = resolve(&SearchArgs::default(), &config_with_key()).unwrap();
        assert_eq!(run_config.api_key, "key");
        assert_eq!(run_config.output_path, PathBuf::from("newchannels.csv"));
        assert_eq!(run_config.days_ago, 1);
        assert_eq!(run_config.page_size, 50);
        assert_eq!(run_config.retry, RetryPolicy::default());
    }

    #[test]
    fn cli_overrides_file() {
        let args = SearchArgs {
            days_ago: Some(3),
            output: Some(PathBuf::from("out/x.csv")),
            max_retries: Some(0),
            page_size: Some(10),
            ..Default::default()
        };
        let run_config = resolve(&args, &config_with_key()).unwrap();
        assert_eq!(run_config.days_ago, 3);
        assert_eq!(run_config.output_path, PathBuf::from("out/x.csv"));
        assert_eq!(run_config.retry.max_retries, 0);
        assert_eq!(run_config.page_size, 10);
    }

    #[test]
    fn missing_key_fails_resolve() {
        let mut config = Config::default();
        config.youtube.api_key = None;
        let err = resolve(&SearchArgs::default(), &config).unwrap_err();
        assert!(err.to_string().contains("YOUTUBE_API_KEY"));
    }
}
