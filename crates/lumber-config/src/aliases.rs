//! Textual level aliases. Configuration-boundary only; the core compares
//! levels numerically and never sees these strings.

use lumber_core::level::Level;

/// Parses a level name, full or one-letter, case-insensitively.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_ascii_uppercase().as_str() {
        "CRITICAL" | "C" => Some(Level::Critical),
        "ERROR" | "E" => Some(Level::Error),
        "WARNING" | "W" => Some(Level::Warning),
        "NOTICE" | "N" => Some(Level::Notice),
        "INFO" | "I" => Some(Level::Info),
        "DEBUG" | "D" => Some(Level::Debug),
        _ => None,
    }
}

/// [`parse_level`] with a fallback for unknown names.
#[must_use]
pub fn level_or(s: &str, default: Level) -> Level {
    parse_level(s).unwrap_or(default)
}
