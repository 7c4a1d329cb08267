//! Sink construction errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while building a sink. Always surfaced synchronously to whoever
/// is constructing the sink, never swallowed.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid destination url {url}: {reason}")]
    Url { url: String, reason: String },

    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}
