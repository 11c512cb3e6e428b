//! Streaming bar sink backed by a formatter.

use std::io::Write;
use tickbar_aggregate::{BarSink, SinkError};
use tickbar_types::BarSnapshot;
use tracing::debug;

use crate::Formatter;

/// Writes every rendered bar as one record.
///
/// The formatter's header is written before the first record. The writer is
/// flushed after each record so updates show up as they happen.
#[derive(Debug)]
pub struct WriterSink<F, W> {
    formatter: F,
    writer: W,
    header_written: bool,
    records: u64,
}

impl<F: Formatter, W: Write> WriterSink<F, W> {
    /// Creates a new sink.
    #[must_use]
    pub const fn new(formatter: F, writer: W) -> Self {
        Self {
            formatter,
            writer,
            header_written: false,
            records: 0,
        }
    }

    /// Returns the number of records written.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Consumes the sink, returning the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<F: Formatter, W: Write> BarSink for WriterSink<F, W> {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        debug!(%symbol, format = self.formatter.extension(), "streaming bars");
        Ok(())
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        if !self.header_written {
            self.formatter.write_header(&mut self.writer)?;
            self.header_written = true;
        }
        self.formatter.write_record(bar, &mut self.writer)?;
        self.writer.flush()?;
        self.records += 1;
        Ok(())
    }
}
