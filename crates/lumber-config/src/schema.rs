//! User-facing configuration schema.

use serde::Deserialize;

use lumber_sinks::{FileOptions, HttpOptions};

/// Top-level logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Default threshold for modules without their own entry.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// Per-module threshold and destinations.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// One destination: `http:`/`https:` URL, `-`/`_` for the process default
/// backend, anything else is a file path.
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    pub dst: String,
    /// Accepted for document compatibility; gating is governed by the
    /// module-level threshold, not per destination.
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub options: SinkOptions,
}

/// Per-destination options. Irrelevant fields are ignored by each
/// destination kind. Async delivery defaults to on for constructed sinks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SinkOptions {
    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub insecure: Option<bool>,
    #[serde(default)]
    pub get: Option<bool>,
    #[serde(default)]
    pub formatted: Option<bool>,
    #[serde(default, rename = "async")]
    pub async_delivery: Option<bool>,
    #[serde(default)]
    pub truncate: Option<bool>,
    /// Unix permission bits for newly created files.
    #[serde(default)]
    pub mode: Option<u32>,
}

impl SinkOptions {
    pub(crate) fn http(&self) -> HttpOptions {
        HttpOptions {
            timeout_secs: self.timeout.unwrap_or(0),
            insecure: self.insecure.unwrap_or(false),
            get: self.get.unwrap_or(false),
            formatted: self.formatted.unwrap_or(false),
            async_delivery: self.async_delivery.unwrap_or(true),
        }
    }

    pub(crate) fn file(&self) -> FileOptions {
        FileOptions {
            async_delivery: self.async_delivery.unwrap_or(true),
            truncate: self.truncate.unwrap_or(false),
            mode: self.mode.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_full_document() {
        let doc = r#"
level: I
modules:
  - name: svc.api
    level: W
    sinks:
      - dst: /var/log/api.log
        options:
          truncate: true
          async: false
      - dst: https://logs.example.com/ingest
        options:
          timeout: 5
          insecure: true
  - name: svc.worker
    sinks:
      - dst: "-"
"#;
        let cfg: LoggingConfig = serde_yaml::from_str(doc).unwrap();
        assert_eq!(cfg.level.as_deref(), Some("I"));
        assert_eq!(cfg.modules.len(), 2);

        let api = &cfg.modules[0];
        assert_eq!(api.name, "svc.api");
        assert_eq!(api.sinks[0].dst, "/var/log/api.log");
        let file = api.sinks[0].options.file();
        assert!(file.truncate);
        assert!(!file.async_delivery);
        let http = api.sinks[1].options.http();
        assert_eq!(http.timeout_secs, 5);
        assert!(http.insecure);
        assert!(http.async_delivery);

        assert_eq!(cfg.modules[1].sinks[0].dst, "-");
    }

    #[test]
    fn test_minimal_document() {
        let cfg: LoggingConfig = serde_yaml::from_str("{}").unwrap();
        assert!(cfg.level.is_none());
        assert!(cfg.modules.is_empty());
    }
}
