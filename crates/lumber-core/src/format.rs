//! Formatter seam.

use std::io;

use crate::record::Record;

/// Renders a record into a full log line.
///
/// The exact textual layout (timestamp format, color codes, field order) is
/// a formatter concern; the dispatch engine only threads the record and the
/// stack-depth hint through.
pub trait Formatter: Send + Sync {
    fn format(&self, calldepth: usize, record: &Record, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Stock formatter: `YYYY-MM-DD HH:MM:SS.mmm LEVEL [module]: message`.
///
/// Ignores the call-depth hint; it does not resolve call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainFormatter;

impl Formatter for PlainFormatter {
    fn format(&self, _calldepth: usize, record: &Record, out: &mut dyn io::Write) -> io::Result<()> {
        write!(
            out,
            "{} {} [{}]: {}",
            record.time.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level,
            record.module,
            record.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::level::Level;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_plain_formatter_layout() {
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 12, 30, 45).unwrap();
        let record = Record::new(7, time, "svc.api", Level::Warning, None, args!["slow", "query"]);
        let mut buf = Vec::new();
        PlainFormatter.format(0, &record, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "2024-03-05 12:30:45.000 WARNING [svc.api]: slow query"
        );
    }
}
