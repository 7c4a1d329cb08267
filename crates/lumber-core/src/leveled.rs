//! Per-module level gating in front of a sink.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use crate::sink::Sink;

/// A sink with a runtime-adjustable module→level table.
pub trait LeveledSink: Sink {
    /// True if an event at `level` for `module` should be emitted.
    fn is_enabled_for(&self, level: Level, module: &str) -> bool;

    /// Upserts the threshold for `module`; the empty module name sets the
    /// default entry.
    fn set_level(&self, level: Level, module: &str);

    /// The effective threshold for `module` after prefix resolution.
    fn get_level(&self, module: &str) -> Level;
}

/// Wraps an inner sink with a hierarchical module→level table.
///
/// Module names are dot-delimited; resolution walks from the full name,
/// trimming the last segment until an explicit entry (or the `""` default)
/// is found. With no entry anywhere the module is enabled for every level.
pub struct Leveled {
    inner: Arc<dyn Sink>,
    levels: RwLock<HashMap<String, Level>>,
}

impl Leveled {
    #[must_use]
    pub fn new(inner: Arc<dyn Sink>) -> Self {
        Self {
            inner,
            levels: RwLock::new(HashMap::new()),
        }
    }

    /// Longest-matching-prefix lookup over dot segments, ending at the `""`
    /// default. `None` means no entry exists anywhere.
    fn resolve(&self, module: &str) -> Option<Level> {
        let levels = self.levels.read().unwrap_or_else(PoisonError::into_inner);
        let mut key = module;
        loop {
            if let Some(level) = levels.get(key) {
                return Some(*level);
            }
            if key.is_empty() {
                return None;
            }
            key = match key.rfind('.') {
                Some(i) => &key[..i],
                None => "",
            };
        }
    }
}

impl Sink for Leveled {
    fn log(&self, level: Level, calldepth: usize, record: &Record) -> Result<()> {
        self.inner.log(level, calldepth + 1, record)
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}

impl LeveledSink for Leveled {
    fn is_enabled_for(&self, level: Level, module: &str) -> bool {
        // No configured entry anywhere: fail open.
        match self.resolve(module) {
            Some(threshold) => level.passes(threshold),
            None => true,
        }
    }

    fn set_level(&self, level: Level, module: &str) {
        self.levels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(module.to_owned(), level);
    }

    fn get_level(&self, module: &str) -> Level {
        self.resolve(module).unwrap_or(Level::Debug)
    }
}

/// Late-bound leveled sink: holds an accessor returning "the current
/// backend" and delegates every operation through it at call time.
///
/// A logger bound to a proxy transparently follows later changes to the
/// process-wide default backend, which matters for loggers created before
/// global setup completes.
pub struct LeveledProxy {
    get: Box<dyn Fn() -> Arc<dyn LeveledSink> + Send + Sync>,
}

impl LeveledProxy {
    pub fn new(get: impl Fn() -> Arc<dyn LeveledSink> + Send + Sync + 'static) -> Self {
        Self { get: Box::new(get) }
    }
}

impl Sink for LeveledProxy {
    fn log(&self, level: Level, calldepth: usize, record: &Record) -> Result<()> {
        (self.get)().log(level, calldepth, record)
    }

    fn close(&self) -> Result<()> {
        (self.get)().close()
    }
}

impl LeveledSink for LeveledProxy {
    fn is_enabled_for(&self, level: Level, module: &str) -> bool {
        (self.get)().is_enabled_for(level, module)
    }

    fn set_level(&self, level: Level, module: &str) {
        (self.get)().set_level(level, module);
    }

    fn get_level(&self, module: &str) -> Level {
        (self.get)().get_level(module)
    }
}
