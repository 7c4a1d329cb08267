//! Prefix decoration over a logger.

use crate::level::Level;
use crate::logger::Logger;
use crate::record::Arg;

const DEFAULT_SEPARATOR: &str = " ->";

/// Wraps a logger and prepends a fixed prefix to everything it emits.
///
/// Plain-args calls get the prefix as a leading argument; format-string
/// calls get it prepended to the format string.
pub struct PrefixLogger {
    parent: Logger,
    prefix: String,
}

impl PrefixLogger {
    /// `separator` defaults to `" ->"` when `None`.
    #[must_use]
    pub fn new(parent: Logger, prefix: &str, separator: Option<&str>) -> Self {
        let separator = separator.unwrap_or(DEFAULT_SEPARATOR);
        Self {
            parent,
            prefix: format!("{}{}", prefix.trim(), separator),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn parent(&self) -> &Logger {
        &self.parent
    }

    fn prefixed_args(&self, args: Vec<Arg>) -> Vec<Arg> {
        let mut out = Vec::with_capacity(args.len() + 1);
        out.push(Arg::value(self.prefix.clone()));
        out.extend(args);
        out
    }

    fn prefixed_format(&self, format: impl Into<String>) -> String {
        format!("{} {}", self.prefix, format.into())
    }

    pub fn log(&self, level: Level, args: Vec<Arg>) {
        self.parent.log(level, self.prefixed_args(args));
    }

    pub fn logf(&self, level: Level, format: impl Into<String>, args: Vec<Arg>) {
        self.parent.logf(level, self.prefixed_format(format), args);
    }

    pub fn critical(&self, args: Vec<Arg>) {
        self.log(Level::Critical, args);
    }

    pub fn criticalf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Critical, format, args);
    }

    pub fn error(&self, args: Vec<Arg>) {
        self.log(Level::Error, args);
    }

    pub fn errorf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Error, format, args);
    }

    pub fn warning(&self, args: Vec<Arg>) {
        self.log(Level::Warning, args);
    }

    pub fn warningf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Warning, format, args);
    }

    pub fn notice(&self, args: Vec<Arg>) {
        self.log(Level::Notice, args);
    }

    pub fn noticef(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Notice, format, args);
    }

    pub fn info(&self, args: Vec<Arg>) {
        self.log(Level::Info, args);
    }

    pub fn infof(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Info, format, args);
    }

    pub fn debug(&self, args: Vec<Arg>) {
        self.log(Level::Debug, args);
    }

    pub fn debugf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.logf(Level::Debug, format, args);
    }

    pub fn fatal(&self, args: Vec<Arg>) -> ! {
        self.parent.fatal(self.prefixed_args(args));
    }

    pub fn fatalf(&self, format: impl Into<String>, args: Vec<Arg>) -> ! {
        self.parent.fatalf(self.prefixed_format(format), args);
    }

    pub fn panic(&self, args: Vec<Arg>) -> ! {
        self.parent.panic(self.prefixed_args(args));
    }

    pub fn panicf(&self, format: impl Into<String>, args: Vec<Arg>) -> ! {
        self.parent.panicf(self.prefixed_format(format), args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::memory::MemorySink;
    use crate::registry::Registry;
    use crate::sink::Sink;
    use std::sync::Arc;

    fn setup() -> (Arc<Registry>, PrefixLogger, Arc<MemorySink>) {
        let registry = Registry::new();
        let capture = Arc::new(MemorySink::new());
        registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);
        let prefixed = PrefixLogger::new(registry.logger("svc"), "worker-3", None);
        (registry, prefixed, capture)
    }

    #[test]
    fn test_prefix_prepended_to_args() {
        let (_registry, logger, capture) = setup();
        logger.info(args!["started"]);
        assert_eq!(capture.records()[0].message, "worker-3 -> started");
    }

    #[test]
    fn test_parent_exposes_undecorated_logger() {
        let (_registry, logger, capture) = setup();
        assert_eq!(logger.parent().module(), "svc");
        logger.parent().info(args!["bare"]);
        assert_eq!(capture.records()[0].message, "bare");
    }

    #[test]
    fn test_prefix_prepended_to_format() {
        let (_registry, logger, capture) = setup();
        logger.errorf("retry {} failed", args![2]);
        assert_eq!(capture.records()[0].message, "worker-3 -> retry 2 failed");
    }

    #[test]
    fn test_custom_separator_and_trim() {
        let registry = Registry::new();
        let capture = Arc::new(MemorySink::new());
        registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);
        let logger = PrefixLogger::new(registry.logger("svc"), "  gateway ", Some(":"));
        assert_eq!(logger.prefix(), "gateway:");
        logger.debug(args!["up"]);
        assert_eq!(capture.records()[0].message, "gateway: up");
    }
}
