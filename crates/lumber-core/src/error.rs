//! Delivery error taxonomy.

use thiserror::Error;

/// Result type alias for sink delivery.
pub type Result<T> = std::result::Result<T, SinkError>;

/// Failure reported by a sink while delivering a record.
///
/// Construction-time failures (opening files, building clients, decoding
/// configuration) live with the crates that build sinks; this type only
/// covers the call-time delivery path.
#[derive(Debug, Error)]
pub enum SinkError {
    /// I/O failure on the sink's underlying writer.
    #[error("sink {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded for the wire.
    #[error("sink {name}: encoding failed: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Delivery failure reported by a concrete sink implementation.
    #[error("sink {name}: {message}")]
    Delivery { name: String, message: String },

    /// One or more constituents of a fan-out failed. Every sink still saw
    /// the record; the failures are collected here in delivery order.
    #[error("fan-out delivery failed for {} of {total} sinks", failures.len())]
    Fanout {
        total: usize,
        failures: Vec<SinkError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fanout_display_counts_failures() {
        let err = SinkError::Fanout {
            total: 3,
            failures: vec![
                SinkError::Delivery {
                    name: "a".into(),
                    message: "down".into(),
                },
                SinkError::Delivery {
                    name: "b".into(),
                    message: "down".into(),
                },
            ],
        };
        assert_eq!(err.to_string(), "fan-out delivery failed for 2 of 3 sinks");
    }

    #[test]
    fn test_io_source_is_preserved() {
        let err = SinkError::Io {
            name: "file:/tmp/x.log".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(err.to_string().contains("file:/tmp/x.log"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
