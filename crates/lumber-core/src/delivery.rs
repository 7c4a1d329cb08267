//! Synchronous/asynchronous delivery wrapper.

use std::sync::Arc;
use std::thread;

use crate::args;
use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{Arg, Record};
use crate::sink::{PrintSink, Sink};

/// How a [`DeliverySink`] performs the underlying I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// I/O runs on the caller's thread; its result is propagated.
    Sync,
    /// I/O runs on a fire-and-forget background thread; the call returns
    /// `Ok(())` immediately. No ordering among async deliveries, and no
    /// guarantee an async write completes before process exit.
    Async,
}

/// Wraps a sink with a delivery mode.
///
/// In async mode the caller never sees delivery errors (the call has already
/// returned); failures are reported through the diagnostics logger handed in
/// at construction instead of being dropped. Each background task receives
/// its own snapshot of the record, taken before the call returns, so the
/// delivered content is fixed at call time.
pub struct DeliverySink<S: ?Sized> {
    inner: Arc<S>,
    name: String,
    mode: DeliveryMode,
    diagnostics: Logger,
}

impl<S: Sink + ?Sized + 'static> DeliverySink<S> {
    pub fn new(inner: Arc<S>, name: impl Into<String>, mode: DeliveryMode, diagnostics: Logger) -> Self {
        Self {
            inner,
            name: name.into(),
            mode,
            diagnostics,
        }
    }

    #[must_use]
    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S: Sink + ?Sized + 'static> Sink for DeliverySink<S> {
    fn log(&self, level: Level, calldepth: usize, record: &Record) -> Result<()> {
        match self.mode {
            DeliveryMode::Sync => self.inner.log(level, calldepth, record),
            DeliveryMode::Async => {
                let snapshot = record.clone();
                let inner = Arc::clone(&self.inner);
                let name = self.name.clone();
                let diagnostics = self.diagnostics.clone();
                thread::spawn(move || {
                    if let Err(err) = inner.log(level, calldepth, &snapshot) {
                        diagnostics.errorf("async delivery via {} failed: {}", args![name, err]);
                    }
                });
                Ok(())
            }
        }
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}

impl<S: PrintSink + ?Sized + 'static> PrintSink for DeliverySink<S> {
    fn print(&self, args: &[Arg]) -> Result<()> {
        match self.mode {
            DeliveryMode::Sync => self.inner.print(args),
            DeliveryMode::Async => {
                let args = args.to_vec();
                let inner = Arc::clone(&self.inner);
                let name = self.name.clone();
                let diagnostics = self.diagnostics.clone();
                thread::spawn(move || {
                    if let Err(err) = inner.print(&args) {
                        diagnostics.errorf("async print via {} failed: {}", args![name, err]);
                    }
                });
                Ok(())
            }
        }
    }
}
