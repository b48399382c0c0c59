//! Logger instance, record dispatch and the chainable entry API.
//!
//! # Data Flow
//! ```text
//! Entry::{debug,info,warning,error}(msg)
//!     → Logger::log (threshold check)
//!         → format.rs (logfmt-style line) → sink (stdout by default)
//!         → hooks (severity-filtered, e.g. Sentry forwarding)
//! ```
//!
//! # Design Decisions
//! - A logger is immutable after construction; reconfiguration means
//!   building a new instance (see [`LoggerProvider`])
//! - The sink sits behind a mutex so concurrent records stay line-atomic
//! - Logging calls never return errors; a sink write failure is dropped
//!
//! [`LoggerProvider`]: crate::provider::LoggerProvider

mod format;

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use thiserror::Error;

use crate::config::EnvConfig;
use crate::sentry::{DsnError, SentryHook};
use crate::severity::Severity;

/// Structured key/value context attached to a single record.
pub type Fields = BTreeMap<String, Value>;

/// One log record, as seen by hooks.
#[derive(Debug)]
pub struct Record<'a> {
    pub severity: Severity,
    pub message: &'a str,
    pub fields: &'a Fields,
}

/// Callback invoked for every emitted record at its trigger severities.
pub trait Hook: Send + Sync {
    /// Whether this hook wants records of the given severity.
    fn triggers(&self, severity: Severity) -> bool;

    /// Handle one record. Failures must stay inside the hook; a logging
    /// call can never fail from the caller's perspective.
    fn fire(&self, record: &Record<'_>);
}

/// Construction-time failure.
///
/// Every variant indicates deployment misconfiguration.
/// [`LoggerProvider::get`] turns these into a panic so a bad rollout
/// stops at startup instead of running with silently degraded telemetry;
/// [`LoggerProvider::try_get`] returns them for callers that want to
/// decide for themselves.
///
/// [`LoggerProvider::get`]: crate::provider::LoggerProvider::get
/// [`LoggerProvider::try_get`]: crate::provider::LoggerProvider::try_get
#[derive(Debug, Error)]
pub enum BuildError {
    /// `SENTRY_DSN` is not a well-formed Sentry endpoint.
    #[error("invalid Sentry DSN {dsn:?}: {source}")]
    InvalidDsn {
        dsn: String,
        #[source]
        source: DsnError,
    },

    /// The HTTP client for hook delivery could not be constructed.
    #[error("sentry transport: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A configured logger: sink, severity threshold and forwarding hooks.
///
/// Instances are built from the environment (see [`Logger::from_env`])
/// and handed out behind an [`Arc`]; nothing about them can change
/// afterwards.
pub struct Logger {
    sink: Mutex<Box<dyn Write + Send>>,
    level: Severity,
    hooks: Vec<Box<dyn Hook>>,
}

impl Logger {
    /// Build a logger from the current process environment, writing to
    /// stdout.
    ///
    /// `LOGGER_LEVEL` selects the threshold (invalid values fall back to
    /// `info` and are reported once on the new logger itself, with the
    /// rejected value attached as a field). A non-empty `SENTRY_DSN`
    /// attaches the forwarding hook.
    pub fn from_env() -> Result<Logger, BuildError> {
        Self::from_env_with_sink(Box::new(io::stdout()))
    }

    /// Same as [`Logger::from_env`], but writing to the given sink.
    ///
    /// This is the seam output-asserting tests use: inject an in-memory
    /// buffer instead of capturing process stdout.
    pub fn from_env_with_sink(sink: Box<dyn Write + Send>) -> Result<Logger, BuildError> {
        let config = EnvConfig::from_env();
        let (level, rejected) = Severity::resolve(&config.level);

        let mut hooks: Vec<Box<dyn Hook>> = Vec::new();
        if !config.sentry_dsn.is_empty() {
            hooks.push(Box::new(SentryHook::new(&config.sentry_dsn)?));
        }

        let logger = Logger {
            sink: Mutex::new(sink),
            level,
            hooks,
        };

        // Report the fallback on the fully built logger, so the notice
        // obeys the same formatting and forwarding rules as any other
        // record. The message stays constant; the rejected value goes
        // into the fields.
        if let Some(invalid) = rejected {
            let mut fields = Fields::new();
            fields.insert("value".to_string(), Value::String(invalid.value));
            logger.log(
                Severity::Warning,
                "invalid LOGGER_LEVEL value, please use debug, info, warning or error",
                &fields,
            );
        }

        Ok(logger)
    }

    /// Severity threshold in effect for this instance.
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Start an entry carrying one field.
    pub fn with_field(self: Arc<Self>, key: impl Into<String>, value: impl Into<Value>) -> Entry {
        Entry::new(self).with_field(key, value)
    }

    /// Start an entry carrying a field map.
    pub fn with_fields(self: Arc<Self>, fields: Fields) -> Entry {
        Entry::new(self).with_fields(fields)
    }

    pub(crate) fn log(&self, severity: Severity, message: &str, fields: &Fields) {
        if severity < self.level {
            return;
        }

        let line = format::render_line(severity, message, fields);
        {
            let mut sink = match self.sink.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let _ = writeln!(sink, "{}", line);
        }

        let record = Record {
            severity,
            message,
            fields,
        };
        for hook in &self.hooks {
            if hook.triggers(severity) {
                hook.fire(&record);
            }
        }
    }
}

/// Chainable field-carrying context, terminated by a severity method.
///
/// Message-only logging is deliberately not offered: records without
/// context are a dead end when debugging, so every call site starts from
/// `with_field` or `with_fields`.
pub struct Entry {
    logger: Arc<Logger>,
    fields: Fields,
}

impl Entry {
    fn new(logger: Arc<Logger>) -> Self {
        Entry {
            logger,
            fields: Fields::new(),
        }
    }

    /// Add one field; an existing key is overwritten.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Merge a field map into the entry.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Emit the entry at debug severity.
    pub fn debug(self, message: &str) {
        self.log(Severity::Debug, message);
    }

    /// Emit the entry at info severity.
    pub fn info(self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Emit the entry at warning severity.
    pub fn warning(self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Emit the entry at error severity.
    pub fn error(self, message: &str) {
        self.log(Severity::Error, message);
    }

    fn log(self, severity: Severity, message: &str) {
        self.logger.log(severity, message, &self.fields);
    }
}
