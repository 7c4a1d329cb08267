//! Configuration boundary for the lumber logging stack.
//!
//! Decodes a YAML document describing the default threshold and per-module
//! destinations, then wires the described sinks into a
//! [`lumber_core::registry::Registry`]:
//!
//! ```no_run
//! use lumber_config::{from_yaml, SinkBuilder};
//! use lumber_core::registry::Registry;
//!
//! # fn main() -> Result<(), lumber_config::ConfigError> {
//! let doc = r#"
//! level: I
//! modules:
//!   - name: svc.api
//!     level: W
//!     sinks:
//!       - dst: /var/log/api.log
//!         options:
//!           async: true
//! "#;
//! let registry = Registry::new();
//! let builder = SinkBuilder::new(registry.clone());
//! builder.apply(&from_yaml(doc)?)?;
//! # Ok(())
//! # }
//! ```
//!
//! Destinations are plain strings: `-` or `_` for the registry's default
//! backend, an `http:`/`https:` URL for an HTTP endpoint, anything else for
//! a file path. Level names accept single-letter aliases (`E` for `ERROR`
//! and so on).

pub mod aliases;
pub mod builder;
pub mod errors;
pub mod schema;

pub use aliases::{level_or, parse_level};
pub use builder::{from_yaml, SinkBuilder};
pub use errors::ConfigError;
pub use schema::{LoggingConfig, ModuleConfig, SinkConfig, SinkOptions};
