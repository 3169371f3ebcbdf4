//! Channel list output: CSV file plus console preview

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, RecordBatch, StringArray};
use chanwatch_core::{CsvSink, fmt_num};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::fetch::ChannelRecord;
use crate::schema;

/// Rows shown at each end of the preview when it is truncated
const PREVIEW_EDGE: usize = 5;

/// Build the single-column record batch, preserving discovery order
pub fn channels_batch(records: &[ChannelRecord]) -> Result<RecordBatch> {
    let ids: ArrayRef = Arc::new(StringArray::from_iter_values(
        records.iter().map(|r| r.channel_id.as_str()),
    ));
    RecordBatch::try_new(schema::channels().clone(), vec![ids]).context("Cannot build channel batch")
}

/// Write `records` to `path`, replacing any existing file.
///
/// An empty set writes nothing and leaves an existing file untouched.
/// Returns the number of rows written, `None` when nothing was written.
pub fn save_channels(records: &[ChannelRecord], path: &Path) -> Result<Option<usize>> {
    if records.is_empty() {
        log::info!("No new channels found.");
        return Ok(None);
    }

    let batch = channels_batch(records)?;
    let mut sink =
        CsvSink::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    sink.write_batch(&batch)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    let rows = sink
        .finalize()
        .with_context(|| format!("Cannot finalize {}", path.display()))?;

    log::info!("Saved {} channels to {}", fmt_num(rows), path.display());
    Ok(Some(rows))
}

/// Head/tail preview of the channel list with row indices
pub fn preview_table(records: &[ChannelRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new(schema::CHANNEL_ID).fg(Color::Cyan),
        ]);

    let n = records.len();
    let row = |i: usize| vec![Cell::new(i), Cell::new(&records[i].channel_id)];
    if n <= 2 * PREVIEW_EDGE {
        for i in 0..n {
            table.add_row(row(i));
        }
    } else {
        for i in 0..PREVIEW_EDGE {
            table.add_row(row(i));
        }
        table.add_row(vec![Cell::new("..."), Cell::new("...")]);
        for i in n - PREVIEW_EDGE..n {
            table.add_row(row(i));
        }
    }
    table
}

/// Print the preview and shape line on stderr
pub fn print_preview(records: &[ChannelRecord]) {
    eprintln!("\n{}", preview_table(records));
    eprintln!("[{} rows x 1 columns]", fmt_num(records.len()));
}
