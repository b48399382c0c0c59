//! Environment-configured structured logging with Sentry forwarding.
//!
//! The crate manages a [`Logger`] built entirely from environment
//! variables, cached behind a [`LoggerProvider`], and a chainable
//! [`Entry`] API for attaching structured context to every record.
//! Records render as one `key=value` line each on stdout; with a
//! `SENTRY_DSN` configured, warning-and-above records are additionally
//! forwarded to the error tracker, errors with a stack trace attached.
//!
//! # Usage
//!
//! ```no_run
//! use logbridge::{Fields, LoggerProvider};
//! use serde_json::json;
//!
//! let log = LoggerProvider::new();
//!
//! log.with_field("user_id", 42).info("user logged in");
//!
//! log.with_fields(Fields::from([
//!     ("driver_id".to_string(), json!(7)),
//!     ("ride_id".to_string(), json!("r-1042")),
//! ]))
//! .info("ride accepted");
//!
//! log.with_field("err", "connection reset")
//!     .error("could not store ride end event");
//! ```
//!
//! Message-only variants are deliberately not offered: records without
//! context are a dead end when debugging, so every call site starts from
//! `with_field` or `with_fields`.
//!
//! # Configuration
//!
//! | Variable | Effect |
//! |---|---|
//! | `LOGGER_LEVEL` | Minimum severity: `debug`, `info`, `warning` or `error` (case-insensitive). Empty selects `debug`; anything else selects `info` and logs one warning. |
//! | `SENTRY_DSN` | When non-empty, warning-and-above records are forwarded to this endpoint. A malformed value fails construction. |
//!
//! The environment is read once, when the logger is built.
//! [`LoggerProvider::reload`] drops the cached instance so tests can pick
//! up changed variables.
//!
//! # A note on Sentry grouping
//!
//! Sentry groups occurrences of a problem by message and stack trace, so
//! keep the message identical across occurrences and put everything that
//! varies (the offending value, the wrapped error) into the fields, which
//! land in the event's `extra` data. Wrapped errors can be anything;
//! report the *consequence* in the message and the error itself as a
//! field, and the extra data will tell you which causes are worth
//! handling next.

// Core logging
pub mod logger;
pub mod severity;

// Configuration & construction
pub mod config;
pub mod provider;

// Forwarding
pub mod sentry;

pub use logger::{BuildError, Entry, Fields, Hook, Logger, Record};
pub use provider::LoggerProvider;
pub use sentry::{Dsn, DsnError, SentryHook};
pub use severity::{InvalidLevel, Severity};
