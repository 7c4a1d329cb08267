//! Leveled, module-scoped logging: the backend dispatch engine.
//!
//! A call like "log at level X for module M with arguments A" becomes a
//! [`record::Record`] that is gated by a hierarchical module→level table
//! ([`leveled::Leveled`]), fanned out to one or more sinks
//! ([`fanout::MultiSink`]) and delivered either on the caller's thread or by
//! a fire-and-forget background task ([`delivery::DeliverySink`]).
//!
//! The [`registry::Registry`] is the explicitly constructed context a
//! process owns: default backend, logger table, record sequence counter and
//! clock. Concrete file/network sinks and configuration decoding live in
//! their own crates; this crate only speaks the [`sink::Sink`] contract.
//!
//! ```
//! use std::sync::Arc;
//! use lumber_core::args;
//! use lumber_core::level::Level;
//! use lumber_core::memory::MemorySink;
//! use lumber_core::registry::Registry;
//! use lumber_core::sink::Sink;
//!
//! let registry = Registry::new();
//! let capture = Arc::new(MemorySink::new());
//! registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);
//! registry.set_level(Level::Warning, "svc.api");
//!
//! let log = registry.logger("svc.api.http");
//! log.info(args!["suppressed"]);
//! log.errorf("upstream {} unreachable", args!["billing"]);
//!
//! assert_eq!(capture.len(), 1);
//! ```

pub mod delivery;
pub mod error;
pub mod fanout;
pub mod format;
pub mod level;
pub mod leveled;
pub mod logger;
pub mod memory;
pub mod prefix;
pub mod record;
pub mod registry;
pub mod sensitive;
pub mod sink;
pub mod writer;

pub use delivery::{DeliveryMode, DeliverySink};
pub use error::SinkError;
pub use fanout::MultiSink;
pub use format::{Formatter, PlainFormatter};
pub use level::Level;
pub use leveled::{Leveled, LeveledProxy, LeveledSink};
pub use logger::Logger;
pub use memory::MemorySink;
pub use prefix::PrefixLogger;
pub use record::{Arg, Record, RecordData};
pub use registry::{Clock, Registry};
pub use sensitive::{redact, Redactable, Sensitive};
pub use sink::{NoopSink, PrintSink, Sink};
pub use writer::WriterSink;
