//! Severity levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Log severity.
///
/// Ordinals increase toward `Debug`, so a *lower* ordinal means a *more*
/// severe event: `Critical` is the most severe, `Debug` the least. Derived
/// comparison operators follow the ordinal, which is why filtering uses
/// [`Level::passes`] instead of raw `<`/`>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Level {
    /// True when `self` is at least as severe as `threshold`.
    #[must_use]
    pub fn passes(self, threshold: Level) -> bool {
        self <= threshold
    }

    /// Upper-case name, matching the serialized form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Notice => "NOTICE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
