//! Sink over any `io::Write`.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, SinkError};
use crate::format::{Formatter, PlainFormatter};
use crate::level::Level;
use crate::record::{join_args, Arg, Record};
use crate::sink::{PrintSink, Sink};

/// Writes one formatted line per record to a mutex-guarded writer.
///
/// The mutex keeps lines whole: whichever caller acquires the writer first
/// wins that position, so a single synchronous `WriterSink` delivers records
/// in lock-acquisition order.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
    formatter: Arc<dyn Formatter>,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    /// Writer sink with the stock [`PlainFormatter`].
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self::with_formatter(writer, name, Arc::new(PlainFormatter))
    }

    pub fn with_formatter(writer: W, name: impl Into<String>, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            writer: Mutex::new(writer),
            formatter,
            name: name.into(),
        }
    }

    fn io_err(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            name: self.name.clone(),
            source,
        }
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn log(&self, _level: Level, calldepth: usize, record: &Record) -> Result<()> {
        let line = record.formatted(&*self.formatter, calldepth + 1);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}").map_err(|e| self.io_err(e))
    }

    fn close(&self) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush().map_err(|e| self.io_err(e))
    }
}

impl<W: Write + Send> PrintSink for WriterSink<W> {
    fn print(&self, args: &[Arg]) -> Result<()> {
        let line = join_args(args);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}").map_err(|e| self.io_err(e))
    }
}
