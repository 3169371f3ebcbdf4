//! CSV output sink with atomic tmp→rename

use std::ffi::OsString;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use arrow::array::RecordBatch;
use arrow::csv::{Writer, WriterBuilder};

/// CSV writer that lands at its final path only on `finalize`.
///
/// The header row is taken from the schema of the first batch written.
pub struct CsvSink {
    writer: Writer<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(".tmp");
    PathBuf::from(s)
}

impl CsvSink {
    /// Open a sink targeting `path`, creating parent directories as needed.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = tmp_path_for(path);
        cleanup_tmp_file(path)?;

        let file = File::create(&tmp_path)?;
        let writer = WriterBuilder::new().with_header(true).build(file);
        Ok(Self {
            writer,
            tmp_path,
            final_path: path.to_path_buf(),
            row_count: 0,
        })
    }

    /// Append a record batch
    pub fn write_batch(&mut self, batch: &RecordBatch) -> io::Result<()> {
        self.writer.write(batch).map_err(io::Error::other)?;
        self.row_count += batch.num_rows();
        Ok(())
    }

    /// Flush and rename tmp → final, replacing any existing file. Returns rows written.
    pub fn finalize(self) -> io::Result<usize> {
        let file = self.writer.into_inner();
        file.sync_all()?;
        drop(file);
        fs::rename(&self.tmp_path, &self.final_path)?;
        Ok(self.row_count)
    }
}

/// Remove a stale `.tmp` left next to `path` by an interrupted run
pub fn cleanup_tmp_file(path: &Path) -> io::Result<()> {
    let tmp = tmp_path_for(path);
    if tmp.exists() {
        log::warn!("Removing stale tmp file: {}", tmp.display());
        fs::remove_file(&tmp)?;
    }
    Ok(())
}
