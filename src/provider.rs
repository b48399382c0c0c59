//! Lazily cached logger provider.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde_json::Value;

use crate::logger::{BuildError, Entry, Fields, Logger};

/// Hands out one shared [`Logger`] built from the environment.
///
/// Own a provider at the application's composition root and pass it (or
/// entries created from it) down; there is deliberately no process-global
/// instance.
///
/// ```no_run
/// use logbridge::LoggerProvider;
///
/// let log = LoggerProvider::new();
/// log.with_field("user_id", 42).info("user logged in");
/// ```
pub struct LoggerProvider {
    cached: ArcSwapOption<Logger>,
}

impl LoggerProvider {
    /// A provider with an empty cache; the first access builds the logger.
    pub const fn new() -> Self {
        LoggerProvider {
            cached: ArcSwapOption::const_empty(),
        }
    }

    /// The cached logger, built from the environment on first use.
    ///
    /// # Panics
    ///
    /// Panics when construction fails (see [`BuildError`], e.g. a
    /// malformed `SENTRY_DSN`): deployment misconfiguration should stop
    /// the process at startup, not silently degrade telemetry. Use
    /// [`try_get`](LoggerProvider::try_get) to handle the error instead.
    pub fn get(&self) -> Arc<Logger> {
        match self.try_get() {
            Ok(logger) => logger,
            Err(err) => panic!("logger construction failed: {}", err),
        }
    }

    /// Fallible variant of [`get`](LoggerProvider::get).
    pub fn try_get(&self) -> Result<Arc<Logger>, BuildError> {
        if let Some(logger) = self.cached.load_full() {
            return Ok(logger);
        }
        // Two threads may race here and both build; the last store wins
        // and the loser's instance stays valid for its caller.
        let fresh = Arc::new(Logger::from_env()?);
        self.cached.store(Some(Arc::clone(&fresh)));
        Ok(fresh)
    }

    /// Drop the cached instance so the next access re-reads the
    /// environment. A test seam (and a deliberate-reload escape hatch),
    /// not part of the day-to-day API.
    pub fn reload(&self) {
        self.cached.store(None);
    }

    /// Shorthand for `get().with_fields(fields)`.
    pub fn with_fields(&self, fields: Fields) -> Entry {
        self.get().with_fields(fields)
    }

    /// Shorthand for `get().with_field(key, value)`.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry {
        self.get().with_field(key, value)
    }
}

impl Default for LoggerProvider {
    fn default() -> Self {
        Self::new()
    }
}
