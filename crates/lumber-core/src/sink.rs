//! Sink contracts.

use crate::error::Result;
use crate::level::Level;
use crate::record::{Arg, Record};

/// A destination capable of accepting log records.
///
/// The dispatch engine only ever calls the methods on this trait (and
/// [`PrintSink::print`] where available); sink internals are opaque to it.
pub trait Sink: Send + Sync {
    /// Delivers one record. `calldepth` is a source-attribution hint for
    /// formatters that resolve call sites; it is incremented by each
    /// wrapping layer.
    fn log(&self, level: Level, calldepth: usize, record: &Record) -> Result<()>;

    /// Releases any resource the sink owns. Sinks without a releasable
    /// resource keep the default no-op.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Sinks that can additionally emit a raw, unformatted line.
pub trait PrintSink: Sink {
    fn print(&self, args: &[Arg]) -> Result<()>;
}

/// Discards everything. Stand-in where a real destination is absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl Sink for NoopSink {
    fn log(&self, _level: Level, _calldepth: usize, _record: &Record) -> Result<()> {
        Ok(())
    }
}

impl PrintSink for NoopSink {
    fn print(&self, _args: &[Arg]) -> Result<()> {
        Ok(())
    }
}
