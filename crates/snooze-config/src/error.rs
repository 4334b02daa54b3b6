//! Error types for configuration parsing and validation.

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while parsing or validating a configuration.
///
/// Any of these rejects the entire configuration document: an invalid
/// configuration offers no safe default behavior, so there is no partial
/// acceptance.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document could not be deserialized at all.
    #[error("malformed configuration document: {0}")]
    Document(#[from] serde_json::Error),

    /// A clock time literal is not a valid `HH:MM` value.
    #[error("invalid clock time '{value}': expected HH:MM between 00:00 and 23:59")]
    InvalidClockTime {
        /// The offending literal.
        value: String,
    },

    /// A time range string does not split into a valid start/stop pair.
    #[error("invalid time range '{value}': {reason}")]
    InvalidTimeRange {
        /// The offending range string.
        value: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// A schedule entry failed validation.
    #[error("invalid schedule '{name}': {reason}")]
    InvalidSchedule {
        /// Name of the schedule (as found in the document, trimmed).
        name: String,
        /// Description of why the schedule is invalid.
        reason: String,
    },

    /// The global notification defaults failed validation.
    #[error("invalid notification defaults: {reason}")]
    InvalidDefaults {
        /// Description of why the defaults are invalid.
        reason: String,
    },

    /// The `logLevel` field is not one of the four known levels.
    #[error("invalid log level '{value}': expected error, warn, info, or debug")]
    InvalidLogLevel {
        /// The offending level name.
        value: String,
    },
}
