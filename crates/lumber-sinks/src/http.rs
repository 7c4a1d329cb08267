//! HTTP destination sink.

use std::sync::Arc;
use std::time::Duration;

use lumber_core::error::SinkError;
use lumber_core::format::{Formatter, PlainFormatter};
use lumber_core::level::Level;
use lumber_core::record::{join_args, Arg, Record};
use lumber_core::sink::{PrintSink, Sink};
use reqwest::blocking::Client;
use reqwest::Url;

use crate::errors::BuildError;

const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Options for an HTTP destination.
#[derive(Debug, Clone, Copy)]
pub struct HttpOptions {
    /// Per-request timeout in seconds; `0` means the 2 s default.
    pub timeout_secs: u64,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Use GET with a query parameter instead of POST.
    pub get: bool,
    /// Send the formatter-rendered line instead of the JSON projection.
    pub formatted: bool,
    /// Deliver on a background task instead of the caller's thread.
    pub async_delivery: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            insecure: false,
            get: false,
            formatted: false,
            async_delivery: false,
        }
    }
}

/// Posts each record to an HTTP endpoint, as the JSON-encoded
/// [`lumber_core::record::RecordData`] projection by default or as the
/// rendered line with `formatted` set.
///
/// Delivery blocks the caller for at most the configured timeout; callers
/// wanting to stay off the network path wrap this sink in an async
/// [`lumber_core::delivery::DeliverySink`].
pub struct HttpSink {
    client: Client,
    url: Url,
    get: bool,
    formatted: bool,
    formatter: Arc<dyn Formatter>,
}

impl HttpSink {
    pub fn new(url: Url, options: HttpOptions) -> Result<Self, BuildError> {
        let timeout = if options.timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            options.timeout_secs
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(timeout))
            .danger_accept_invalid_certs(options.insecure)
            .build()?;
        Ok(Self {
            client,
            url,
            get: options.get,
            formatted: options.formatted,
            formatter: Arc::new(PlainFormatter),
        })
    }

    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    fn name(&self) -> String {
        format!("http:{}", self.url)
    }

    fn delivery_err(&self, err: reqwest::Error) -> SinkError {
        SinkError::Delivery {
            name: self.name(),
            message: err.to_string(),
        }
    }

    fn send_message(&self, message: &str) -> Result<(), SinkError> {
        if self.get {
            let mut url = self.url.clone();
            url.query_pairs_mut().append_pair("message", message);
            self.client.get(url).send().map_err(|e| self.delivery_err(e))?;
        } else {
            self.client
                .post(self.url.clone())
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(message.to_owned())
                .send()
                .map_err(|e| self.delivery_err(e))?;
        }
        Ok(())
    }
}

impl Sink for HttpSink {
    fn log(&self, _level: Level, calldepth: usize, record: &Record) -> Result<(), SinkError> {
        let body = if self.formatted {
            record.formatted(&*self.formatter, calldepth).to_owned()
        } else {
            serde_json::to_string(&record.data()).map_err(|source| SinkError::Encode {
                name: self.name(),
                source,
            })?
        };
        self.send_message(&body)
    }
}

impl PrintSink for HttpSink {
    fn print(&self, args: &[Arg]) -> Result<(), SinkError> {
        let line = join_args(args);
        if self.get {
            let mut url = self.url.clone();
            url.query_pairs_mut().append_pair("string", &line);
            self.client.get(url).send().map_err(|e| self.delivery_err(e))?;
        } else {
            let mut url = self.url.clone();
            url.query_pairs_mut().append_pair("string", "true");
            self.client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(line)
                .send()
                .map_err(|e| self.delivery_err(e))?;
        }
        Ok(())
    }
}
