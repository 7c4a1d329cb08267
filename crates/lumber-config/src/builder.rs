//! Turns decoded configuration into live sinks and thresholds.

use std::sync::Arc;

use lumber_core::args;
use lumber_core::delivery::{DeliveryMode, DeliverySink};
use lumber_core::fanout::MultiSink;
use lumber_core::level::Level;
use lumber_core::leveled::Leveled;
use lumber_core::logger::Logger;
use lumber_core::registry::Registry;
use lumber_core::sink::Sink;
use lumber_sinks::{FileSinkCache, HttpSink};
use reqwest::Url;

use crate::aliases::level_or;
use crate::errors::ConfigError;
use crate::schema::{LoggingConfig, SinkConfig};

/// Decodes a YAML logging configuration document.
pub fn from_yaml(doc: &str) -> Result<LoggingConfig, ConfigError> {
    Ok(serde_yaml::from_str(doc)?)
}

/// Builds sinks for a registry and applies configured thresholds.
///
/// Owns the file-sink identity cache, so every configuration pass (and
/// every module within one) shares file handles by path.
pub struct SinkBuilder {
    registry: Arc<Registry>,
    cache: FileSinkCache,
    diagnostics: Logger,
}

impl SinkBuilder {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        let diagnostics = registry.logger("lumber.config");
        Self {
            cache: FileSinkCache::new(diagnostics.clone()),
            registry,
            diagnostics,
        }
    }

    /// Constructs one sink from its destination string.
    pub fn build(&self, config: &SinkConfig) -> Result<Arc<dyn Sink>, ConfigError> {
        let dst = config.dst.as_str();
        if dst == "-" || dst == "_" {
            // Late-bound hand-off to whatever the default backend becomes.
            return Ok(Arc::new(self.registry.proxy()));
        }
        if dst.starts_with("http:") || dst.starts_with("https:") {
            let url = Url::parse(dst).map_err(|err| ConfigError::Destination {
                dst: dst.to_owned(),
                reason: err.to_string(),
            })?;
            let options = config.options.http();
            let sink = HttpSink::new(url, options)?;
            let mode = if options.async_delivery {
                DeliveryMode::Async
            } else {
                DeliveryMode::Sync
            };
            return Ok(Arc::new(DeliverySink::new(
                Arc::new(sink),
                format!("http:{dst}"),
                mode,
                self.diagnostics.clone(),
            )));
        }
        Ok(self.cache.acquire(dst, config.options.file())?)
    }

    /// Applies a whole configuration: default level, per-module backends and
    /// thresholds. A destination that fails to build is reported through the
    /// diagnostics logger and skipped; the rest of the configuration still
    /// applies.
    pub fn apply(&self, config: &LoggingConfig) -> Result<(), ConfigError> {
        if let Some(level) = &config.level {
            self.registry.set_level(level_or(level, Level::Debug), "");
        }
        for module in &config.modules {
            let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
            for sink_config in &module.sinks {
                match self.build(sink_config) {
                    Ok(sink) => sinks.push(sink),
                    Err(err) => self.diagnostics.errorf(
                        "sink {} for module {} skipped: {}",
                        args![sink_config.dst.clone(), module.name.clone(), err],
                    ),
                }
            }
            let logger = self.registry.logger(&module.name);
            if !sinks.is_empty() {
                let inner: Arc<dyn Sink> = if sinks.len() == 1 {
                    sinks.remove(0)
                } else {
                    Arc::new(MultiSink::new(sinks))
                };
                logger.set_backend(Arc::new(Leveled::new(inner)));
            }
            if let Some(level) = &module.level {
                let level = level_or(level, Level::Debug);
                match logger.backend() {
                    Some(backend) => backend.set_level(level, &module.name),
                    None => self.registry.set_level(level, &module.name),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SinkOptions;
    use lumber_core::memory::MemorySink;
    use lumber_core::record::Record;
    use chrono::Utc;

    fn sink_config(dst: &str) -> SinkConfig {
        SinkConfig {
            dst: dst.to_owned(),
            level: None,
            options: SinkOptions::default(),
        }
    }

    #[test]
    fn test_dash_builds_default_backend_proxy() {
        let registry = Registry::new();
        let capture = Arc::new(MemorySink::new());
        registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);

        let builder = SinkBuilder::new(Arc::clone(&registry));
        let sink = builder.build(&sink_config("-")).unwrap();

        let record = Record::new(1, Utc::now(), "m", Level::Info, None, args!["via", "proxy"]);
        sink.log(Level::Info, 0, &record).unwrap();
        assert_eq!(capture.len(), 1);
    }

    #[test]
    fn test_file_destinations_share_one_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let dst = path.to_string_lossy().into_owned();

        let registry = Registry::new();
        let builder = SinkBuilder::new(registry);

        let first = builder.build(&sink_config(&dst)).unwrap();
        let second = builder.build(&sink_config(&dst)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalid_url_is_a_destination_error() {
        let registry = Registry::new();
        let builder = SinkBuilder::new(registry);
        let err = builder.build(&sink_config("http://")).err().unwrap();
        assert!(matches!(err, ConfigError::Destination { .. }));
    }

    #[test]
    fn test_apply_wires_modules_and_levels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.log");
        let doc = format!(
            r#"
level: D
modules:
  - name: svc.api
    level: W
    sinks:
      - dst: {}
        options:
          async: false
"#,
            path.display()
        );
        let config = from_yaml(&doc).unwrap();

        let registry = Registry::new();
        let builder = SinkBuilder::new(Arc::clone(&registry));
        builder.apply(&config).unwrap();

        let log = registry.logger("svc.api");
        log.info(args!["suppressed"]);
        log.errorf("boom {}", args![1]);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("ERROR [svc.api]: boom 1"));
        assert_eq!(registry.get_level("svc.api"), Level::Debug); // default backend untouched
    }

    #[test]
    fn test_apply_skips_broken_destination_but_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.log");
        let config = LoggingConfig {
            level: None,
            modules: vec![crate::schema::ModuleConfig {
                name: "svc".into(),
                level: Some("E".into()),
                sinks: vec![
                    sink_config("http://"),
                    SinkConfig {
                        dst: good.to_string_lossy().into_owned(),
                        level: None,
                        options: SinkOptions {
                            async_delivery: Some(false),
                            ..SinkOptions::default()
                        },
                    },
                ],
            }],
        };

        let registry = Registry::new();
        let builder = SinkBuilder::new(Arc::clone(&registry));
        builder.apply(&config).unwrap();

        registry.logger("svc").critical(args!["kept"]);
        assert!(std::fs::read_to_string(&good).unwrap().contains("kept"));
    }
}
