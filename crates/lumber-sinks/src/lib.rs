//! Concrete sink implementations for the lumber dispatch engine.
//!
//! File destinations go through [`file::FileSinkCache`], which guarantees at
//! most one live sink per path process-wide; HTTP destinations are built
//! directly. Both can be wrapped in
//! [`lumber_core::delivery::DeliverySink`] for asynchronous delivery.

pub mod errors;
pub mod file;
pub mod http;

pub use errors::BuildError;
pub use file::{FileOptions, FileSink, FileSinkCache};
pub use http::{HttpOptions, HttpSink};
