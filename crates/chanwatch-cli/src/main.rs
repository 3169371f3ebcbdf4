//! chanwatch - daily discovery of newly created YouTube channels
//!
//! Searches the YouTube Data API for channels created on one UTC day
//! (yesterday by default) and writes their ids to `newchannels.csv`.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "chanwatch")]
#[command(about = "Find YouTube channels created on a given day")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    search: cmd::search::SearchArgs,

    /// Suppress info logs (only warnings and errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./chanwatch.toml or ~/.config/chanwatch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = chanwatch_core::ProgressContext::new();
    let multi = progress.is_tty().then(|| progress.multi());
    chanwatch_core::init_logging(cli.quiet, cli.debug, multi);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    chanwatch_core::set_http_config(chanwatch_core::HttpConfig {
        timeout: std::time::Duration::from_secs(config.http.timeout_secs),
    });

    match cli.command {
        Some(Command::Config) => cmd::config::run(&config),
        None => cmd::search::run(cli.search, &config, &progress),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_runs_search() {
        let cli = Cli::try_parse_from(["chanwatch"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.search.days_ago.is_none());
        assert!(!cli.search.strict);
    }

    #[test]
    fn date_conflicts_with_days_ago() {
        let res = Cli::try_parse_from(["chanwatch", "--date", "2024-01-01", "--days-ago", "2"]);
        assert!(res.is_err());
    }

    #[test]
    fn page_size_out_of_range() {
        assert!(Cli::try_parse_from(["chanwatch", "--page-size", "51"]).is_err());
        assert!(Cli::try_parse_from(["chanwatch", "--page-size", "0"]).is_err());
    }

    #[test]
    fn quiet_flag() {
        let cli = Cli::try_parse_from(["chanwatch", "-q"]).unwrap();
        assert!(cli.quiet);
        let cli = Cli::try_parse_from(["chanwatch", "config", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn search_args_rejected_with_config_subcommand() {
        assert!(Cli::try_parse_from(["chanwatch", "--days-ago", "3", "config"]).is_err());
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["chanwatch", "config", "--debug"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Config)));
        assert!(cli.debug);
    }
}
