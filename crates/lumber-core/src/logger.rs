//! Logger façade: per-level convenience methods over a leveled backend.

use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::level::Level;
use crate::leveled::LeveledSink;
use crate::record::{join_args, Arg, Record};
use crate::registry::Registry;

/// Creates records for one module and hands them to a leveled backend.
///
/// A logger without a dedicated backend resolves the registry's default
/// backend on every call, so it transparently follows later reconfiguration.
/// Handles are cheap to clone and share one underlying instance.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

struct LoggerInner {
    module: String,
    registry: Weak<Registry>,
    backend: RwLock<Option<Arc<dyn LeveledSink>>>,
    // Additional call depth when this logger is wrapped by another layer.
    extra_calldepth: AtomicUsize,
}

impl Logger {
    pub(crate) fn new(module: impl Into<String>, registry: Weak<Registry>) -> Self {
        Self {
            inner: Arc::new(LoggerInner {
                module: module.into(),
                registry,
                backend: RwLock::new(None),
                extra_calldepth: AtomicUsize::new(0),
            }),
        }
    }

    #[must_use]
    pub fn module(&self) -> &str {
        &self.inner.module
    }

    /// Overrides the registry default backend for this logger.
    pub fn set_backend(&self, backend: Arc<dyn LeveledSink>) {
        *self
            .inner
            .backend
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(backend);
    }

    /// The dedicated backend, if one was set.
    #[must_use]
    pub fn backend(&self) -> Option<Arc<dyn LeveledSink>> {
        self.inner
            .backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_extra_calldepth(&self, extra: usize) {
        self.inner.extra_calldepth.store(extra, Ordering::Relaxed);
    }

    #[must_use]
    pub fn extra_calldepth(&self) -> usize {
        self.inner.extra_calldepth.load(Ordering::Relaxed)
    }

    fn current_backend(&self) -> Option<Arc<dyn LeveledSink>> {
        if let Some(backend) = self.backend() {
            return Some(backend);
        }
        self.inner
            .registry
            .upgrade()
            .map(|registry| registry.default_backend())
    }

    /// True if the backend would emit an event at `level` for this module.
    #[must_use]
    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.current_backend()
            .map(|backend| backend.is_enabled_for(level, &self.inner.module))
            .unwrap_or(false)
    }

    fn write(&self, level: Level, format: Option<String>, args: Vec<Arg>) {
        // Gate before paying for record construction.
        if !self.is_enabled_for(level) {
            return;
        }
        let Some(registry) = self.inner.registry.upgrade() else {
            return;
        };
        let Some(backend) = self.current_backend() else {
            return;
        };
        let record = Record::new(
            registry.next_sequence(),
            registry.now(),
            self.inner.module.clone(),
            level,
            format,
            args,
        );
        // calldepth 2 reaches the caller of the level helpers. The backend
        // owns delivery-error policy; nothing to surface from a void call.
        let _ = backend.log(level, 2 + self.extra_calldepth(), &record);
    }

    pub fn log(&self, level: Level, args: Vec<Arg>) {
        self.write(level, None, args);
    }

    pub fn logf(&self, level: Level, format: impl Into<String>, args: Vec<Arg>) {
        self.write(level, Some(format.into()), args);
    }

    pub fn critical(&self, args: Vec<Arg>) {
        self.write(Level::Critical, None, args);
    }

    pub fn criticalf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Critical, Some(format.into()), args);
    }

    pub fn error(&self, args: Vec<Arg>) {
        self.write(Level::Error, None, args);
    }

    pub fn errorf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Error, Some(format.into()), args);
    }

    pub fn warning(&self, args: Vec<Arg>) {
        self.write(Level::Warning, None, args);
    }

    pub fn warningf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Warning, Some(format.into()), args);
    }

    pub fn notice(&self, args: Vec<Arg>) {
        self.write(Level::Notice, None, args);
    }

    pub fn noticef(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Notice, Some(format.into()), args);
    }

    pub fn info(&self, args: Vec<Arg>) {
        self.write(Level::Info, None, args);
    }

    pub fn infof(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Info, Some(format.into()), args);
    }

    pub fn debug(&self, args: Vec<Arg>) {
        self.write(Level::Debug, None, args);
    }

    pub fn debugf(&self, format: impl Into<String>, args: Vec<Arg>) {
        self.write(Level::Debug, Some(format.into()), args);
    }

    /// Logs at Critical, then terminates the process with status 1.
    pub fn fatal(&self, args: Vec<Arg>) -> ! {
        self.write(Level::Critical, None, args);
        process::exit(1);
    }

    /// Format-string variant of [`Logger::fatal`].
    pub fn fatalf(&self, format: impl Into<String>, args: Vec<Arg>) -> ! {
        self.write(Level::Critical, Some(format.into()), args);
        process::exit(1);
    }

    /// Logs at Critical, then panics with the rendered message.
    pub fn panic(&self, args: Vec<Arg>) -> ! {
        let message = join_args(&args);
        self.write(Level::Critical, None, args);
        panic!("{}", message);
    }

    /// Format-string variant of [`Logger::panic`].
    pub fn panicf(&self, format: impl Into<String>, args: Vec<Arg>) -> ! {
        let format = format.into();
        let rendered = crate::record::apply_format(&format, &args);
        self.write(Level::Critical, Some(format), args);
        panic!("{}", rendered);
    }
}
