//! End-to-end configuration tests: YAML document in, wired registry out.

use std::sync::Arc;

use lumber_config::{from_yaml, SinkBuilder};
use lumber_core::args;
use lumber_core::level::Level;
use lumber_core::memory::MemorySink;
use lumber_core::sink::Sink;
use lumber_core::registry::Registry;

#[test]
fn test_module_fans_out_to_file_and_default_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worker.log");
    let doc = format!(
        r#"
modules:
  - name: svc.worker
    sinks:
      - dst: {}
        options:
          async: false
      - dst: "-"
"#,
        path.display()
    );
    let config = from_yaml(&doc).unwrap();

    let registry = Registry::new();
    let capture = Arc::new(MemorySink::new());
    registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);

    let builder = SinkBuilder::new(Arc::clone(&registry));
    builder.apply(&config).unwrap();

    registry.logger("svc.worker").noticef("job {} done", args![7]);

    let file_contents = std::fs::read_to_string(&path).unwrap();
    assert!(file_contents.contains("NOTICE [svc.worker]: job 7 done"));
    assert_eq!(capture.len(), 1);
    assert_eq!(capture.records()[0].message, "job 7 done");
}

#[test]
fn test_default_level_applies_to_unconfigured_modules() {
    let config = from_yaml("level: W\nmodules: []").unwrap();

    let registry = Registry::new();
    let capture = Arc::new(MemorySink::new());
    registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);
    // set_backend installs a fresh backend, so apply after it.
    SinkBuilder::new(Arc::clone(&registry))
        .apply(&config)
        .unwrap();

    let logger = registry.logger("anything.at.all");
    logger.info(args!["quiet"]);
    logger.critical(args!["loud"]);

    assert_eq!(capture.len(), 1);
    assert_eq!(capture.records()[0].level, Level::Critical);
}

#[test]
fn test_child_module_inherits_configured_prefix_level() {
    let dir = dashless_doc();
    let config = from_yaml(&dir).unwrap();

    let registry = Registry::new();
    let capture = Arc::new(MemorySink::new());
    registry.set_backend(vec![Arc::clone(&capture) as Arc<dyn Sink>]);
    SinkBuilder::new(Arc::clone(&registry))
        .apply(&config)
        .unwrap();

    // svc.api has no sinks of its own, so its level lands on the default
    // backend and children resolve it by longest prefix.
    let child = registry.logger("svc.api.http");
    child.notice(args!["dropped"]);
    child.error(args!["kept"]);

    assert_eq!(capture.len(), 1);
    assert_eq!(capture.records()[0].message, "kept");
}

fn dashless_doc() -> String {
    r#"
level: D
modules:
  - name: svc.api
    level: W
    sinks: []
"#
    .to_owned()
}
