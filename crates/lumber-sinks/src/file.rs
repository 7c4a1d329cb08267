//! File-backed sinks with a path-keyed identity cache.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use lumber_core::delivery::{DeliveryMode, DeliverySink};
use lumber_core::logger::Logger;
use lumber_core::writer::WriterSink;

use crate::errors::BuildError;

/// Options for opening a file destination.
///
/// Only the *first* acquisition of a path applies its options; later
/// acquisitions get the cached sink and their options are ignored.
#[derive(Debug, Clone, Copy)]
pub struct FileOptions {
    /// Deliver on a background task instead of the caller's thread.
    pub async_delivery: bool,
    /// Truncate instead of appending.
    pub truncate: bool,
    /// Unix permission bits for a newly created file; `0` means `0o666`.
    pub mode: u32,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            async_delivery: false,
            truncate: false,
            mode: 0,
        }
    }
}

/// A file destination: formatted writer wrapped in a delivery-mode layer.
pub type FileSink = DeliverySink<WriterSink<File>>;

/// Process-wide dedup of file sinks by path.
///
/// Two modules logging to the same file must share one handle; independent
/// handles would interleave partial lines. The map's mutex is held across
/// the open so a concurrent acquire of one path can never race two handles
/// into existence.
pub struct FileSinkCache {
    entries: Mutex<HashMap<PathBuf, Arc<FileSink>>>,
    diagnostics: Logger,
}

impl FileSinkCache {
    /// `diagnostics` receives async delivery failures of the cached sinks.
    #[must_use]
    pub fn new(diagnostics: Logger) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            diagnostics,
        }
    }

    /// Returns the sink for `path`, opening it on first acquisition.
    ///
    /// An existing entry is returned unconditionally, ignoring `options`. An
    /// open failure leaves the cache unpopulated, so a later call may retry.
    pub fn acquire(
        &self,
        path: impl AsRef<Path>,
        options: FileOptions,
    ) -> Result<Arc<FileSink>, BuildError> {
        let path = path.as_ref();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(path) {
            return Ok(Arc::clone(existing));
        }

        let file = open_log_file(path, options).map_err(|source| BuildError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let name = format!("file:{}", path.display());
        let mode = if options.async_delivery {
            DeliveryMode::Async
        } else {
            DeliveryMode::Sync
        };
        let sink = Arc::new(DeliverySink::new(
            Arc::new(WriterSink::new(file, name.clone())),
            name,
            mode,
            self.diagnostics.clone(),
        ));
        entries.insert(path.to_path_buf(), Arc::clone(&sink));
        Ok(sink)
    }

    /// Number of live cached sinks.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn open_log_file(path: &Path, options: FileOptions) -> std::io::Result<File> {
    let mut open = OpenOptions::new();
    if options.truncate {
        open.write(true).create(true).truncate(true);
    } else {
        open.append(true).create(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        open.mode(if options.mode == 0 { 0o666 } else { options.mode });
    }
    open.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumber_core::args;
    use lumber_core::registry::Registry;
    use lumber_core::sink::{PrintSink, Sink};
    use std::thread;

    fn cache() -> (Arc<Registry>, FileSinkCache) {
        let registry = Registry::new();
        let diagnostics = registry.logger("lumber.sinks");
        (registry, FileSinkCache::new(diagnostics))
    }

    #[test]
    fn test_same_path_yields_same_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let (_registry, cache) = cache();

        let first = cache.acquire(&path, FileOptions::default()).unwrap();
        let second = cache.acquire(&path, FileOptions::default()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_concurrent_acquire_yields_one_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let (_registry, cache) = cache();
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let path = path.clone();
                thread::spawn(move || cache.acquire(path, FileOptions::default()).unwrap())
            })
            .collect();

        let sinks: Vec<Arc<FileSink>> = handles
            .into_iter()
            .map(|h| h.join().expect("acquire thread panicked"))
            .collect();
        for sink in &sinks[1..] {
            assert!(Arc::ptr_eq(&sinks[0], sink));
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_caller_options_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.log");
        let (_registry, cache) = cache();

        let sink = cache.acquire(&path, FileOptions::default()).unwrap();
        sink.print(&args!["existing", "content"]).unwrap();

        // Second acquisition asks for truncation; it is ignored.
        let again = cache
            .acquire(
                &path,
                FileOptions {
                    truncate: true,
                    ..FileOptions::default()
                },
            )
            .unwrap();
        assert!(Arc::ptr_eq(&sink, &again));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing content\n");
    }

    #[test]
    fn test_truncate_clears_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.log");
        std::fs::write(&path, "stale\n").unwrap();
        let (_registry, cache) = cache();

        let sink = cache
            .acquire(
                &path,
                FileOptions {
                    truncate: true,
                    ..FileOptions::default()
                },
            )
            .unwrap();
        sink.print(&args!["new"]).unwrap();
        sink.close().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_open_failure_is_not_cached_and_can_retry() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("missing");
        let path = nested.join("late.log");
        let (_registry, cache) = cache();

        assert!(cache.acquire(&path, FileOptions::default()).is_err());
        assert!(cache.is_empty());

        std::fs::create_dir(&nested).unwrap();
        assert!(cache.acquire(&path, FileOptions::default()).is_ok());
        assert_eq!(cache.len(), 1);
    }
}
