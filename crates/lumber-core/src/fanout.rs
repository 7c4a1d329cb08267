//! Fan-out to multiple sinks.

use std::sync::Arc;

use crate::error::{Result, SinkError};
use crate::level::Level;
use crate::record::Record;
use crate::sink::Sink;

/// Delivers every record to an ordered set of sinks.
///
/// Delivery is synchronous and follows construction order, so ordering
/// across sinks is deterministic. A failure in one sink never prevents the
/// remaining sinks from receiving the record; all failures are collected
/// into a single [`SinkError::Fanout`].
pub struct MultiSink {
    sinks: Vec<Arc<dyn Sink>>,
}

impl MultiSink {
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Sink>>) -> Self {
        Self { sinks }
    }

    fn aggregate(&self, failures: Vec<SinkError>) -> Result<()> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(SinkError::Fanout {
                total: self.sinks.len(),
                failures,
            })
        }
    }
}

impl Sink for MultiSink {
    fn log(&self, level: Level, calldepth: usize, record: &Record) -> Result<()> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(err) = sink.log(level, calldepth + 1, record) {
                failures.push(err);
            }
        }
        self.aggregate(failures)
    }

    fn close(&self) -> Result<()> {
        let mut failures = Vec::new();
        for sink in &self.sinks {
            if let Err(err) = sink.close() {
                failures.push(err);
            }
        }
        self.aggregate(failures)
    }
}
