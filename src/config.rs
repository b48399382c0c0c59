//! Process-environment configuration snapshot.
//!
//! Read once per logger construction; a running [`Logger`] never watches
//! the environment. [`LoggerProvider::reload`] drops the cached instance
//! so the next access re-reads it.
//!
//! [`Logger`]: crate::logger::Logger
//! [`LoggerProvider::reload`]: crate::provider::LoggerProvider::reload

use std::env;

/// Variable selecting the minimum severity to emit.
pub const LOGGER_LEVEL: &str = "LOGGER_LEVEL";

/// Variable enabling Sentry forwarding; empty or unset disables it.
pub const SENTRY_DSN: &str = "SENTRY_DSN";

/// Raw configuration values as read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    /// Raw `LOGGER_LEVEL` value; empty when unset.
    pub level: String,
    /// Raw `SENTRY_DSN` value; empty when unset.
    pub sentry_dsn: String,
}

impl EnvConfig {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        EnvConfig {
            level: env::var(LOGGER_LEVEL).unwrap_or_default(),
            sentry_dsn: env::var(SENTRY_DSN).unwrap_or_default(),
        }
    }
}
