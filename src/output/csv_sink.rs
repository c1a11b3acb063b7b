//! CSV record sink
//!
//! Writes `headline,article,url` rows. The header is written when a file is
//! opened in overwrite mode, or in append mode when the file is new or empty.
//! Every record is flushed as soon as it is written.

use crate::crawler::ArticleRecord;
use crate::output::traits::{RecordSink, WriteMode, COLUMNS};
use crate::{SinkError, SinkResult};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// [`RecordSink`] writing to a CSV file
#[derive(Debug)]
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    records_written: usize,
}

impl CsvSink {
    /// Opens (or creates) the output file
    ///
    /// Missing parent directories are created. Failure here is fatal for a
    /// run because nothing could be recorded.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use clickbait_scraper::output::{CsvSink, WriteMode};
    /// use std::path::Path;
    ///
    /// let sink = CsvSink::open(Path::new("data/raw/dailymail.csv"), WriteMode::Overwrite).unwrap();
    /// ```
    pub fn open(path: &Path, mode: WriteMode) -> SinkResult<Self> {
        let open_error = |source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_error)?;
        }

        let file = match mode {
            WriteMode::Overwrite => File::create(path),
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(open_error)?;

        let needs_header = match mode {
            WriteMode::Overwrite => true,
            WriteMode::Append => file.metadata().map_err(open_error)?.len() == 0,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(COLUMNS)?;
            writer.flush()?;
        }

        tracing::debug!(path = %path.display(), ?mode, needs_header, "Opened CSV sink");

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            records_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn write_record(&mut self, record: &ArticleRecord) -> SinkResult<()> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    fn records_written(&self) -> usize {
        self.records_written
    }
}
