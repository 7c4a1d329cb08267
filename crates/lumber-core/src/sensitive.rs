//! Sensitive data marker for automatic redaction
//!
//! Values carrying secrets (passwords, tokens, API keys) are logged through
//! the [`Redactable`] capability: only the masked form ever reaches a sink.

use std::fmt;

/// Capability for values whose raw form must never be rendered into a log.
///
/// The mask returned by `redacted` is stable: calling it repeatedly yields
/// the same output, so re-materializing a record stays idempotent.
pub trait Redactable: Send + Sync {
    /// Masked rendering. Must not leak the raw value.
    fn redacted(&self) -> String;
}

/// Returns a string of `*` with the same character length as `s`.
#[must_use]
pub fn redact(s: &str) -> String {
    "*".repeat(s.chars().count())
}

/// Wrapper marking a value as sensitive.
///
/// Its [`Redactable`] mask is `*` repeated to the rendered length of the
/// inner value, and its `Debug` form is a fixed marker, so the raw value
/// is never displayed accidentally.
///
/// # Example
///
/// ```
/// use lumber_core::sensitive::{Redactable, Sensitive};
///
/// let password = Sensitive::new("secret123");
/// assert_eq!(password.redacted(), "*********");
/// assert_eq!(password.expose(), &"secret123");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value.
    ///
    /// Use sparingly, only where the raw data is actually needed (e.g. for
    /// authentication).
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: fmt::Display + Send + Sync> Redactable for Sensitive<T> {
    fn redacted(&self) -> String {
        redact(&self.0.to_string())
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_matches_length() {
        assert_eq!(redact(""), "");
        assert_eq!(redact("abc"), "***");
        assert_eq!(redact("pässword"), "********");
    }

    #[test]
    fn test_sensitive_redacted_masks_value() {
        let secret = Sensitive::new("my-secret-password");
        let masked = secret.redacted();
        assert_eq!(masked, "*".repeat(18));
        assert!(!masked.contains("secret"));
    }

    #[test]
    fn test_sensitive_redacted_is_stable() {
        let secret = Sensitive::new(12345);
        assert_eq!(secret.redacted(), secret.redacted());
    }

    #[test]
    fn test_sensitive_debug_never_prints_value() {
        let secret = Sensitive::new("api-key-12345");
        let debug_str = format!("{:?}", secret);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("api-key"));
    }

    #[test]
    fn test_sensitive_expose_and_into_inner() {
        let secret = Sensitive::new(String::from("test"));
        assert_eq!(secret.expose(), "test");
        assert_eq!(secret.into_inner(), "test");
    }
}
