//! Log records: creation, lazy message materialization, snapshots.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::format::Formatter;
use crate::level::Level;
use crate::sensitive::Redactable;

/// One opaque log argument.
///
/// Arguments are held by reference (`Arc`), so building a record never copies
/// the underlying values and snapshots of a record stay cheap. Rendering is
/// deferred until the record's message is materialized.
#[derive(Clone)]
pub enum Arg {
    /// Plain value, rendered through `Display`.
    Value(Arc<dyn fmt::Display + Send + Sync>),
    /// Sensitive value; only its mask is ever rendered.
    Secret(Arc<dyn Redactable>),
}

impl Arg {
    /// Wraps a plain display value.
    pub fn value<T: fmt::Display + Send + Sync + 'static>(v: T) -> Self {
        Arg::Value(Arc::new(v))
    }

    /// Wraps a sensitive value; materialization renders its mask only.
    pub fn secret<T: Redactable + 'static>(v: T) -> Self {
        Arg::Secret(Arc::new(v))
    }

    /// Renders the argument, masking sensitive values.
    #[must_use]
    pub fn rendered(&self) -> String {
        match self {
            Arg::Value(v) => v.to_string(),
            Arg::Secret(s) => s.redacted(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "Arg::Value({})", v),
            Arg::Secret(_) => write!(f, "Arg::Secret(***REDACTED***)"),
        }
    }
}

/// Builds a `Vec<Arg>` from plain display values.
///
/// Sensitive values go through [`Arg::secret`] instead:
///
/// ```
/// use lumber_core::args;
/// use lumber_core::record::Arg;
/// use lumber_core::sensitive::Sensitive;
///
/// let mut a = args!["user", 42];
/// a.push(Arg::secret(Sensitive::new("hunter2")));
/// ```
#[macro_export]
macro_rules! args {
    ($($a:expr),* $(,)?) => {
        vec![$($crate::record::Arg::value($a)),*]
    };
}

/// Space-joins rendered arguments.
#[must_use]
pub fn join_args(args: &[Arg]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&arg.rendered());
    }
    out
}

/// Substitutes each `{}` in `format` with the next rendered argument.
///
/// `{{` and `}}` are literal braces. A placeholder with no argument left is
/// emitted verbatim; leftover arguments are appended space-separated.
pub(crate) fn apply_format(format: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(format.len() + 16);
    let mut next = 0usize;
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                if let Some(arg) = args.get(next) {
                    out.push_str(&arg.rendered());
                    next += 1;
                } else {
                    out.push_str("{}");
                }
            }
            _ => out.push(c),
        }
    }
    for arg in &args[next..] {
        out.push(' ');
        out.push_str(&arg.rendered());
    }
    out
}

/// One log event.
///
/// A record carries two lazily computed, memoized views (`message` and
/// `formatted`), each materialized at most once per instance. Delivery paths
/// that outlive the caller's borrow (async hand-off) take a snapshot:
/// `Record` is `Clone`, and a clone carries the memoized values when they are
/// already computed, otherwise it materializes independently.
#[derive(Clone)]
pub struct Record {
    pub id: u64,
    pub time: DateTime<Utc>,
    pub module: String,
    pub level: Level,
    args: Vec<Arg>,
    format: Option<String>,
    message: OnceLock<String>,
    formatted: OnceLock<String>,
}

impl Record {
    /// Creates a record. Normally called by the logger façade, which assigns
    /// `id` from the registry's sequence counter and `time` from its clock.
    #[must_use]
    pub fn new(
        id: u64,
        time: DateTime<Utc>,
        module: impl Into<String>,
        level: Level,
        format: Option<String>,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            id,
            time,
            module: module.into(),
            level,
            args,
            format,
            message: OnceLock::new(),
            formatted: OnceLock::new(),
        }
    }

    /// The record message: redaction then formatting, computed once and
    /// cached. With a format string present the `{}` placeholders are
    /// substituted; otherwise the arguments are space-joined.
    pub fn message(&self) -> &str {
        self.message.get_or_init(|| match &self.format {
            Some(format) => apply_format(format, &self.args),
            None => join_args(&self.args),
        })
    }

    /// The fully rendered log line, computed by `formatter` on first call and
    /// cached. `calldepth` is a source-attribution hint passed through to the
    /// formatter.
    pub fn formatted(&self, formatter: &dyn Formatter, calldepth: usize) -> &str {
        self.formatted.get_or_init(|| {
            let mut buf = Vec::new();
            let _ = formatter.format(calldepth + 1, self, &mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    }

    /// Immutable, fully evaluated projection. Finalizes the message.
    #[must_use]
    pub fn data(&self) -> RecordData {
        RecordData {
            id: self.id,
            time: self.time,
            module: self.module.clone(),
            level: self.level,
            message: self.message().to_owned(),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("time", &self.time)
            .field("module", &self.module)
            .field("level", &self.level)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Fully evaluated, immutable projection of a [`Record`], suitable for
/// structured encoding (e.g. the JSON body of an HTTP sink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordData {
    pub id: u64,
    pub time: DateTime<Utc>,
    pub module: String,
    pub level: Level,
    pub message: String,
}
