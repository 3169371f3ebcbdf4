//! Arrow schema for the channel table

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema};

/// Output column name, also the CSV header
pub const CHANNEL_ID: &str = "channelid";

/// newchannels.csv: one row per discovered channel
pub fn channels() -> &'static Arc<Schema> {
    static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
        Arc::new(Schema::new(vec![Field::new(
            CHANNEL_ID,
            DataType::Utf8,
            false,
        )]))
    });
    &SCHEMA
}
