//! Log severity levels and resolution of the `LOGGER_LEVEL` value.

use std::fmt;

use thiserror::Error;

/// Ordered log severity.
///
/// `Fatal` and `Panic` cannot be produced through the [`Entry`] API and
/// cannot be selected via `LOGGER_LEVEL`; they complete the ladder so that
/// forwarding hooks can express their trigger thresholds.
///
/// [`Entry`]: crate::logger::Entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
    Panic,
}

/// A `LOGGER_LEVEL` value outside the accepted set.
///
/// Recovered internally: the logger falls back to [`Severity::Info`] and
/// reports the rejected value once on itself. Never returned to callers.
#[derive(Debug, Clone, Error)]
#[error("invalid level {value:?}")]
pub struct InvalidLevel {
    /// The rejected raw value.
    pub value: String,
}

impl Severity {
    /// Resolve a raw level string, typically the `LOGGER_LEVEL` variable.
    ///
    /// Empty input selects `Debug`, the development-friendly default. Any
    /// unrecognized value selects `Info`, the production-safe fallback,
    /// and returns the rejected input alongside it. Names that other
    /// logging stacks accept ("warn", "fatal", "panic") are rejected on
    /// purpose: the accepted vocabulary is exactly `debug`, `info`,
    /// `warning` and `error`, case-insensitive.
    pub fn resolve(raw: &str) -> (Severity, Option<InvalidLevel>) {
        if raw.is_empty() {
            return (Severity::Debug, None);
        }
        match raw.to_ascii_lowercase().as_str() {
            "debug" => (Severity::Debug, None),
            "info" => (Severity::Info, None),
            "warning" => (Severity::Warning, None),
            "error" => (Severity::Error, None),
            _ => (
                Severity::Info,
                Some(InvalidLevel {
                    value: raw.to_string(),
                }),
            ),
        }
    }

    /// Lowercase name as rendered in output lines and forwarded events.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
            Severity::Panic => "panic",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
