//! The raw, string-level shape of the configuration document.
//!
//! Everything here mirrors the wire format one-to-one: sentinels and time
//! ranges are still plain strings. [`crate::Configuration::from_raw`] is the
//! only way across the boundary into the typed model.

use serde::Deserialize;

/// A configuration document as deserialized, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfiguration {
    /// The schedule entries. Required; a document without a `schedules`
    /// sequence is rejected at deserialization.
    pub schedules: Vec<RawSchedule>,
    /// Global default email recipients.
    #[serde(default, rename = "masterEmails")]
    pub master_emails: Vec<String>,
    /// Global default phone recipients.
    #[serde(default, rename = "masterPhones")]
    pub master_phones: Vec<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Operational log verbosity name.
    #[serde(default, rename = "logLevel")]
    pub log_level: Option<String>,
}

/// One schedule entry as deserialized, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSchedule {
    /// Schedule name.
    pub name: String,
    /// Whether the schedule is active.
    pub enabled: bool,
    /// IANA timezone identifier.
    pub timezone: String,
    /// Monday's range string.
    #[serde(default)]
    pub mo: Option<String>,
    /// Tuesday's range string.
    #[serde(default)]
    pub tu: Option<String>,
    /// Wednesday's range string.
    #[serde(default)]
    pub we: Option<String>,
    /// Thursday's range string.
    #[serde(default)]
    pub th: Option<String>,
    /// Friday's range string.
    #[serde(default)]
    pub fr: Option<String>,
    /// Saturday's range string.
    #[serde(default)]
    pub sa: Option<String>,
    /// Sunday's range string.
    #[serde(default)]
    pub su: Option<String>,
    /// Fallback range string for unlisted weekdays.
    #[serde(default, rename = "default")]
    pub default_range: Option<String>,
    /// Email list, literal addresses and/or `inherited`.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Phone list, literal numbers (optionally `!`-prefixed) and/or
    /// `inherited`.
    #[serde(default)]
    pub phones: Vec<String>,
}
