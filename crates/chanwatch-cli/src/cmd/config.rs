//! Config subcommand - show the effective configuration

use anyhow::Result;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::config::Config;

pub fn run(config: &Config) -> Result<()> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let api_key = if config.youtube.api_key.is_some() {
        Cell::new("configured")
    } else {
        Cell::new("not set").fg(Color::Red)
    };

    table.add_row(vec![Cell::new("API URL"), Cell::new(&config.youtube.api_url)]);
    table.add_row(vec![Cell::new("API key"), api_key]);
    table.add_row(vec![Cell::new("Page size"), Cell::new(config.youtube.page_size)]);
    table.add_row(vec![Cell::new("Days ago"), Cell::new(config.window.days_ago)]);
    table.add_row(vec![
        Cell::new("Output"),
        Cell::new(config.output.path.display()),
    ]);
    table.add_row(vec![
        Cell::new("Max retries"),
        Cell::new(config.retry.max_retries),
    ]);
    table.add_row(vec![
        Cell::new("Retry delay"),
        Cell::new(format!("{}s", config.retry.delay_secs)),
    ]);
    table.add_row(vec![
        Cell::new("Max retry delay"),
        Cell::new(format!("{}s", config.retry.max_delay_secs)),
    ]);
    table.add_row(vec![
        Cell::new("HTTP timeout"),
        Cell::new(format!("{}s", config.http.timeout_secs)),
    ]);

    eprintln!("\n{table}");
    Ok(())
}
