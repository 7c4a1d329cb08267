//! Process-wide logging context: default backend, logger table, sequence
//! counter, clock.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::fanout::MultiSink;
use crate::level::Level;
use crate::leveled::{Leveled, LeveledProxy, LeveledSink};
use crate::logger::Logger;
use crate::sink::{NoopSink, Sink};
use crate::writer::WriterSink;

/// Replaceable time source.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Explicitly constructed logging context, owned by the process entry point.
///
/// Holds the default leveled backend, the module→logger table, the sequence
/// counter shared by every record created through its loggers, and the
/// clock. There is no hidden global: anything that needs the registry is
/// handed an `Arc<Registry>` (or a [`Logger`] created from one).
pub struct Registry {
    default_backend: RwLock<Arc<dyn LeveledSink>>,
    loggers: RwLock<HashMap<String, Logger>>,
    sequence: AtomicU64,
    clock: RwLock<Clock>,
}

impl Registry {
    /// Fresh registry: sequence at zero, wall clock, stderr backend at
    /// Debug.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            default_backend: RwLock::new(Self::stderr_backend()),
            loggers: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(0),
            clock: RwLock::new(Arc::new(Utc::now)),
        })
    }

    fn stderr_backend() -> Arc<dyn LeveledSink> {
        let leveled = Leveled::new(Arc::new(WriterSink::new(io::stderr(), "stderr")));
        leveled.set_level(Level::Debug, "");
        Arc::new(leveled)
    }

    /// Next record id. Strictly increasing across the whole process
    /// regardless of concurrency; only uniqueness and monotonicity matter,
    /// so relaxed ordering is enough.
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Current time from the installed clock.
    pub fn now(&self) -> DateTime<Utc> {
        let clock = Arc::clone(&self.clock.read().unwrap_or_else(PoisonError::into_inner));
        clock()
    }

    /// Replaces the clock, e.g. with a frozen one in tests.
    pub fn set_clock(&self, clock: Clock) {
        *self.clock.write().unwrap_or_else(PoisonError::into_inner) = clock;
    }

    /// Installs the given sinks as the default backend, wrapping more than
    /// one in a [`MultiSink`] and the result in a fresh [`Leveled`].
    /// Returns the installed backend so callers can assign levels.
    pub fn set_backend(&self, mut sinks: Vec<Arc<dyn Sink>>) -> Arc<dyn LeveledSink> {
        let inner: Arc<dyn Sink> = if sinks.len() == 1 {
            sinks.remove(0)
        } else {
            Arc::new(MultiSink::new(sinks))
        };
        let leveled: Arc<dyn LeveledSink> = Arc::new(Leveled::new(inner));
        self.set_default_backend(Arc::clone(&leveled));
        leveled
    }

    /// Installs an already-leveled backend as the default.
    pub fn set_default_backend(&self, backend: Arc<dyn LeveledSink>) {
        *self
            .default_backend
            .write()
            .unwrap_or_else(PoisonError::into_inner) = backend;
    }

    /// The current default backend.
    #[must_use]
    pub fn default_backend(&self) -> Arc<dyn LeveledSink> {
        Arc::clone(
            &self
                .default_backend
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Late-bound view of the default backend: resolves the current value on
    /// every call, so it observes later `set_backend` swaps.
    #[must_use]
    pub fn proxy(self: &Arc<Self>) -> LeveledProxy {
        let registry = Arc::downgrade(self);
        LeveledProxy::new(move || match registry.upgrade() {
            Some(registry) => registry.default_backend(),
            None => Arc::new(Leveled::new(Arc::new(NoopSink))),
        })
    }

    /// Sets the threshold for `module` on the default backend; `""` sets the
    /// default entry.
    pub fn set_level(&self, level: Level, module: &str) {
        self.default_backend().set_level(level, module);
    }

    /// Effective threshold for `module` on the default backend.
    #[must_use]
    pub fn get_level(&self, module: &str) -> Level {
        self.default_backend().get_level(module)
    }

    /// Returns the logger registered for `module`, creating it first if
    /// needed. Loggers are shared: repeated calls yield handles to the same
    /// instance.
    pub fn logger(self: &Arc<Self>, module: &str) -> Logger {
        if let Some(existing) = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(module)
        {
            return existing.clone();
        }
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        loggers
            .entry(module.to_owned())
            .or_insert_with(|| Logger::new(module, Arc::downgrade(self)))
            .clone()
    }

    /// Restores the initial state: sequence at zero, wall clock, stderr
    /// backend at Debug. Registered loggers survive and pick up the restored
    /// default backend. Test hook.
    pub fn reset(&self) {
        self.sequence.store(0, Ordering::Relaxed);
        self.set_clock(Arc::new(Utc::now));
        self.set_default_backend(Self::stderr_backend());
    }
}
