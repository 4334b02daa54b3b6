//! Fail-closed validation of raw configuration documents.
//!
//! The whole document is rejected if any schedule, range, address, or number
//! fails its check; there is no partial acceptance. The one deliberate
//! exception is timezone resolvability: zone tables differ across
//! deployments, so a zone identifier is only required to be a non-empty
//! string here and is resolved per evaluation by the decision engine.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::raw::{RawConfiguration, RawSchedule};
use crate::types::{
    Configuration, EmailEntry, INHERITED, LogLevel, PhoneEntry, PhoneNumber, Schedule, TimeRange,
};

/// Regex for literal email addresses (`local@domain.tld` shape).
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z0-9-]{2,}$").unwrap_or_else(|_| unreachable!())
});

/// Regex for literal phone numbers: optional `!`, then `+` and 10-15 digits
/// beginning with a non-zero digit.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^!?\+[1-9][0-9]{9,14}$").unwrap_or_else(|_| unreachable!()));

/// Checks whether a string is a syntactically valid literal email address.
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_REGEX.is_match(address)
}

/// Checks whether a string is a syntactically valid literal phone number,
/// with or without the `!` opt-in prefix.
#[must_use]
pub fn is_valid_phone(number: &str) -> bool {
    PHONE_REGEX.is_match(number)
}

impl Configuration {
    /// Parses and validates a configuration document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is malformed or any schedule,
    /// range, address, or number fails validation. The entire document is
    /// rejected on the first failure.
    pub fn from_json(document: &str) -> Result<Self> {
        let raw: RawConfiguration = serde_json::from_str(document)?;
        Self::from_raw(raw)
    }

    /// Parses and validates an already-deserialized JSON value.
    ///
    /// # Errors
    ///
    /// Same contract as [`Configuration::from_json`].
    pub fn from_value(document: serde_json::Value) -> Result<Self> {
        let raw: RawConfiguration = serde_json::from_value(document)?;
        Self::from_raw(raw)
    }

    /// Validates a raw document and converts it into the typed model.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first offending field.
    pub fn from_raw(raw: RawConfiguration) -> Result<Self> {
        for address in &raw.master_emails {
            if !is_valid_email(address) {
                return Err(ConfigError::InvalidDefaults {
                    reason: format!("invalid email address '{address}'"),
                });
            }
        }
        for number in &raw.master_phones {
            if !is_valid_phone(number) {
                return Err(ConfigError::InvalidDefaults {
                    reason: format!("invalid phone number '{number}'"),
                });
            }
        }

        let log_level = raw.log_level.as_deref().map(parse_log_level).transpose()?;

        let schedules = raw
            .schedules
            .into_iter()
            .map(convert_schedule)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            schedules = schedules.len(),
            master_emails = raw.master_emails.len(),
            master_phones = raw.master_phones.len(),
            "configuration validated"
        );

        Ok(Self {
            schedules,
            master_emails: raw.master_emails,
            master_phones: raw.master_phones.iter().map(|n| PhoneNumber::parse(n)).collect(),
            description: raw.description,
            log_level,
        })
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel> {
    match value {
        "error" => Ok(LogLevel::Error),
        "warn" => Ok(LogLevel::Warn),
        "info" => Ok(LogLevel::Info),
        "debug" => Ok(LogLevel::Debug),
        _ => Err(ConfigError::InvalidLogLevel {
            value: value.to_string(),
        }),
    }
}

fn convert_schedule(raw: RawSchedule) -> Result<Schedule> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(ConfigError::InvalidSchedule {
            name,
            reason: "name cannot be empty".to_string(),
        });
    }
    if raw.timezone.trim().is_empty() {
        return Err(ConfigError::InvalidSchedule {
            name,
            reason: "timezone cannot be empty".to_string(),
        });
    }

    let day = |field: &'static str, value: Option<String>| -> Result<Option<TimeRange>> {
        value
            .map(|v| {
                v.parse::<TimeRange>().map_err(|e| ConfigError::InvalidSchedule {
                    name: name.clone(),
                    reason: format!("{field}: {e}"),
                })
            })
            .transpose()
    };

    let mo = day("mo", raw.mo)?;
    let tu = day("tu", raw.tu)?;
    let we = day("we", raw.we)?;
    let th = day("th", raw.th)?;
    let fr = day("fr", raw.fr)?;
    let sa = day("sa", raw.sa)?;
    let su = day("su", raw.su)?;
    let default_range = day("default", raw.default_range)?;

    let emails = raw
        .emails
        .into_iter()
        .map(|entry| {
            if entry != INHERITED && !is_valid_email(&entry) {
                return Err(ConfigError::InvalidSchedule {
                    name: name.clone(),
                    reason: format!("invalid email address '{entry}'"),
                });
            }
            Ok(EmailEntry::from(entry))
        })
        .collect::<Result<Vec<_>>>()?;

    let phones = raw
        .phones
        .into_iter()
        .map(|entry| {
            if entry != INHERITED && !is_valid_phone(&entry) {
                return Err(ConfigError::InvalidSchedule {
                    name: name.clone(),
                    reason: format!("invalid phone number '{entry}'"),
                });
            }
            Ok(PhoneEntry::from(entry))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Schedule {
        name,
        enabled: raw.enabled,
        timezone: raw.timezone.trim().to_string(),
        mo,
        tu,
        we,
        th,
        fr,
        sa,
        su,
        default_range,
        emails,
        phones,
    })
}
