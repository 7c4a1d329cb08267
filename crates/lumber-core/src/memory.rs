//! In-memory sink for tests and capture scenarios.

use std::sync::{Mutex, PoisonError};

use crate::error::Result;
use crate::level::Level;
use crate::record::{Arg, Record, RecordData};
use crate::sink::{PrintSink, Sink};

/// Collects delivered records as [`RecordData`] projections.
///
/// Useful for deterministic assertions on what a backend emitted; delivery
/// finalizes each record's message.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<RecordData>>,
    prints: Mutex<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything delivered so far, in delivery order.
    pub fn records(&self) -> Vec<RecordData> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Raw lines received through `print`, in delivery order.
    pub fn printed(&self) -> Vec<String> {
        self.prints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.prints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sink for MemorySink {
    fn log(&self, _level: Level, _calldepth: usize, record: &Record) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.data());
        Ok(())
    }
}

impl PrintSink for MemorySink {
    fn print(&self, args: &[Arg]) -> Result<()> {
        self.prints
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(crate::record::join_args(args));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use chrono::Utc;

    #[test]
    fn test_collects_in_order() {
        let sink = MemorySink::new();
        for i in 1..=3u64 {
            let r = Record::new(i, Utc::now(), "m", Level::Info, None, args![i]);
            sink.log(Level::Info, 0, &r).unwrap();
        }
        let ids: Vec<u64> = sink.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_print_captures_joined_line() {
        let sink = MemorySink::new();
        sink.print(&args!["raw", "line", 1]).unwrap();
        assert_eq!(sink.printed(), vec!["raw line 1".to_owned()]);
    }

    #[test]
    fn test_clear_empties_both_captures() {
        let sink = MemorySink::new();
        let r = Record::new(1, Utc::now(), "m", Level::Info, None, args!["x"]);
        sink.log(Level::Info, 0, &r).unwrap();
        sink.print(&args!["y"]).unwrap();

        sink.clear();
        assert!(sink.is_empty());
        assert!(sink.printed().is_empty());

        // Reusable after clearing.
        sink.log(Level::Info, 0, &r).unwrap();
        assert_eq!(sink.len(), 1);
    }
}
