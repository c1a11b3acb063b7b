//! Sink traits and types
//!
//! This module defines the trait interface for record sinks and the write
//! modes a sink can be opened with.

use crate::crawler::ArticleRecord;
use crate::SinkResult;

/// Column order of every output row
pub const COLUMNS: [&str; 3] = ["headline", "article", "url"];

/// How an output file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate the file and write the header row first
    #[default]
    Overwrite,

    /// Keep existing rows and add new ones at the end
    Append,
}

impl WriteMode {
    pub fn from_append_flag(append: bool) -> Self {
        if append {
            Self::Append
        } else {
            Self::Overwrite
        }
    }
}

/// Trait for record sinks
///
/// A sink receives validated records one at a time. Each call either
/// persists the whole record or fails without leaving a partial row behind,
/// so progress made before an interruption survives.
pub trait RecordSink {
    /// Persists one record
    fn write_record(&mut self, record: &ArticleRecord) -> SinkResult<()>;

    /// Number of records written through this sink
    fn records_written(&self) -> usize;
}
