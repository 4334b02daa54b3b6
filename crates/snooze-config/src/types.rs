//! Core configuration types for the scheduling system.
//!
//! This module provides the validated, strongly typed configuration model:
//! - [`ClockTime`]: a minute-granularity civil clock time
//! - [`TimeBound`] / [`TimeRange`]: one day's start/stop window
//! - [`EmailEntry`] / [`PhoneEntry`]: notification list entries with the
//!   inheritance sentinel decoded
//! - [`Schedule`]: one named weekly timetable
//! - [`Configuration`]: the full document, including global notification
//!   defaults
//!
//! The string sentinels of the wire format (`"never"`, `"inherited"`, the
//! `!` phone prefix) are decoded here, at the parse boundary. Decision logic
//! downstream only ever sees typed values.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// The sentinel marking a notification list entry as "merge with the global
/// defaults" rather than a literal address or number.
pub const INHERITED: &str = "inherited";

/// The sentinel marking one side of a time range as "no action".
pub const NEVER: &str = "never";

/// Operational log verbosity carried in the configuration document.
///
/// This has no effect on decision logic; it is data for whatever
/// orchestration layer embeds the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational detail.
    Info,
    /// Full diagnostic detail.
    Debug,
}

impl LogLevel {
    /// Returns the level as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A civil clock time at minute granularity.
///
/// Ordering is minute-of-day ordering, which for zero-padded `HH:MM`
/// strings coincides with lexical ordering. Seconds are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Minute of hour, 0-59.
    pub minute: u8,
}

impl ClockTime {
    /// Returns the minute-of-day value (0-1439).
    #[must_use]
    pub const fn minute_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidClockTime {
            value: s.to_string(),
        };

        let (hh, mm) = s.split_once(':').ok_or_else(invalid)?;
        // Hours may be written unpadded ("9:00"); minutes are always two digits.
        if hh.is_empty() || hh.len() > 2 || mm.len() != 2 {
            return Err(invalid());
        }
        if !hh.bytes().all(|b| b.is_ascii_digit()) || !mm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = hh.parse().map_err(|_| invalid())?;
        let minute: u8 = mm.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }
}

/// One side of a time range: either a concrete clock time or `never`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBound {
    /// No action for this side of the range.
    Never,
    /// Act at or after this civil time.
    At(ClockTime),
}

impl TimeBound {
    /// Returns true if this bound is the `never` sentinel.
    #[must_use]
    pub const fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "{NEVER}"),
            Self::At(t) => write!(f, "{t}"),
        }
    }
}

impl FromStr for TimeBound {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        if s == NEVER {
            Ok(Self::Never)
        } else {
            Ok(Self::At(s.parse()?))
        }
    }
}

/// One weekday's start/stop window, parsed from `"<start>;<stop>"`.
///
/// Both `;` and `,` are accepted as the separator (`;` preferred when both
/// appear). Exactly two tokens are required; each side is either `HH:MM` or
/// the [`NEVER`] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeRange {
    /// When the resource should come up.
    pub start: TimeBound,
    /// When the resource should go down.
    pub stop: TimeBound,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.start, self.stop)
    }
}

impl FromStr for TimeRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let sep = if s.contains(';') { ';' } else { ',' };
        let mut tokens = s.split(sep);

        let (start, stop) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(start), Some(stop), None) => (start.trim(), stop.trim()),
            _ => {
                return Err(ConfigError::InvalidTimeRange {
                    value: s.to_string(),
                    reason: format!("expected exactly two tokens separated by '{sep}'"),
                });
            }
        };

        let parse_side = |side: &str| -> Result<TimeBound> {
            side.parse().map_err(|e: ConfigError| ConfigError::InvalidTimeRange {
                value: s.to_string(),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            start: parse_side(start)?,
            stop: parse_side(stop)?,
        })
    }
}

impl TryFrom<String> for TimeRange {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

/// A phone number with its non-critical opt-in flag.
///
/// The wire encoding is the bare number, optionally prefixed with `!` when
/// the number should also receive non-critical (success) notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PhoneNumber {
    /// The number itself, without the `!` prefix.
    pub number: String,
    /// Whether this number receives non-critical event notifications.
    pub receives_non_critical: bool,
}

impl PhoneNumber {
    /// Decodes a phone string, stripping the optional `!` prefix into the
    /// opt-in flag.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix('!') {
            Some(rest) => Self {
                number: rest.to_string(),
                receives_non_critical: true,
            },
            None => Self {
                number: s.to_string(),
                receives_non_critical: false,
            },
        }
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.receives_non_critical {
            write!(f, "!{}", self.number)
        } else {
            write!(f, "{}", self.number)
        }
    }
}

impl From<String> for PhoneNumber {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PhoneNumber> for String {
    fn from(p: PhoneNumber) -> Self {
        p.to_string()
    }
}

/// One entry of a schedule's email notification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmailEntry {
    /// Merge the global default emails into this schedule's list.
    Inherited,
    /// A literal recipient address.
    Address(String),
}

impl From<String> for EmailEntry {
    fn from(s: String) -> Self {
        if s == INHERITED {
            Self::Inherited
        } else {
            Self::Address(s)
        }
    }
}

impl From<EmailEntry> for String {
    fn from(entry: EmailEntry) -> Self {
        match entry {
            EmailEntry::Inherited => INHERITED.to_string(),
            EmailEntry::Address(addr) => addr,
        }
    }
}

/// One entry of a schedule's phone notification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhoneEntry {
    /// Merge the global default phones into this schedule's list.
    Inherited,
    /// A literal number with its opt-in flag.
    Number(PhoneNumber),
}

impl From<String> for PhoneEntry {
    fn from(s: String) -> Self {
        if s == INHERITED {
            Self::Inherited
        } else {
            Self::Number(PhoneNumber::parse(&s))
        }
    }
}

impl From<PhoneEntry> for String {
    fn from(entry: PhoneEntry) -> Self {
        match entry {
            PhoneEntry::Inherited => INHERITED.to_string(),
            PhoneEntry::Number(number) => number.to_string(),
        }
    }
}

/// One named weekly timetable governing a class of managed resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Identifier matched (trimmed, case-insensitively) against a resource's
    /// schedule label.
    pub name: String,
    /// Disabled schedules never produce an action.
    pub enabled: bool,
    /// IANA civil-timezone identifier. Resolvability is checked per
    /// evaluation, not at validation time.
    pub timezone: String,
    /// Monday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mo: Option<TimeRange>,
    /// Tuesday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tu: Option<TimeRange>,
    /// Wednesday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub we: Option<TimeRange>,
    /// Thursday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub th: Option<TimeRange>,
    /// Friday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<TimeRange>,
    /// Saturday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sa: Option<TimeRange>,
    /// Sunday's time range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub su: Option<TimeRange>,
    /// Fallback range for any weekday without an explicit entry.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_range: Option<TimeRange>,
    /// Email notification list (literal addresses and/or the inheritance
    /// sentinel).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailEntry>,
    /// Phone notification list (literal numbers and/or the inheritance
    /// sentinel).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<PhoneEntry>,
}

impl Schedule {
    /// Returns the explicit time range configured for a weekday, if any.
    #[must_use]
    pub const fn day_range(&self, weekday: Weekday) -> Option<TimeRange> {
        match weekday {
            Weekday::Mon => self.mo,
            Weekday::Tue => self.tu,
            Weekday::Wed => self.we,
            Weekday::Thu => self.th,
            Weekday::Fri => self.fr,
            Weekday::Sat => self.sa,
            Weekday::Sun => self.su,
        }
    }

    /// Returns the effective time range for a weekday: the explicit entry if
    /// present, otherwise the `default` fallback.
    #[must_use]
    pub const fn range_for(&self, weekday: Weekday) -> Option<TimeRange> {
        match self.day_range(weekday) {
            Some(range) => Some(range),
            None => self.default_range,
        }
    }

    /// Checks whether a resource label binds to this schedule.
    ///
    /// Both sides are whitespace-trimmed and compared case-insensitively.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(label.trim())
    }
}

/// The full validated configuration document for one evaluation pass.
///
/// Immutable once built; a fresh configuration replaces the prior one
/// wholesale between passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// The weekly timetables, one per resource group.
    pub schedules: Vec<Schedule>,
    /// Global default email recipients, merged where a schedule inherits.
    #[serde(default, rename = "masterEmails", skip_serializing_if = "Vec::is_empty")]
    pub master_emails: Vec<String>,
    /// Global default phone recipients, merged where a schedule inherits.
    #[serde(default, rename = "masterPhones", skip_serializing_if = "Vec::is_empty")]
    pub master_phones: Vec<PhoneNumber>,
    /// Free-text description of the configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Operational log verbosity; no effect on decision logic.
    #[serde(default, rename = "logLevel", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<LogLevel>,
}

impl Configuration {
    /// Looks up the schedule bound to a resource label.
    ///
    /// The label is trimmed and matched case-insensitively; the first match
    /// wins. Duplicate schedule names are a caller error and are not
    /// defended against here.
    #[must_use]
    pub fn find_schedule(&self, label: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.matches_label(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(name: &str) -> Schedule {
        Schedule {
            name: name.to_string(),
            enabled: true,
            timezone: "UTC".to_string(),
            mo: None,
            tu: None,
            we: None,
            th: None,
            fr: None,
            sa: None,
            su: None,
            default_range: None,
            emails: Vec::new(),
            phones: Vec::new(),
        }
    }

    mod clock_time_tests {
        use super::*;
        use test_case::test_case;

        #[test_case("00:00", 0, 0)]
        #[test_case("09:30", 9, 30)]
        #[test_case("9:30", 9, 30 ; "unpadded hour")]
        #[test_case("23:59", 23, 59)]
        fn parses_valid_times(input: &str, hour: u8, minute: u8) {
            let time: ClockTime = input.parse().unwrap();
            assert_eq!(time, ClockTime { hour, minute });
        }

        #[test_case("9:99" ; "minute out of range")]
        #[test_case("24:00" ; "hour out of range")]
        #[test_case("12:5" ; "single digit minute")]
        #[test_case("12" ; "no separator")]
        #[test_case("ab:cd" ; "not numeric")]
        #[test_case("-1:00" ; "negative hour")]
        #[test_case("" ; "empty")]
        fn rejects_invalid_times(input: &str) {
            assert!(input.parse::<ClockTime>().is_err());
        }

        #[test]
        fn display_zero_pads() {
            let time = ClockTime { hour: 7, minute: 5 };
            assert_eq!(time.to_string(), "07:05");
        }

        #[test]
        fn ordering_is_minute_of_day() {
            let early: ClockTime = "08:59".parse().unwrap();
            let late: ClockTime = "09:00".parse().unwrap();
            assert!(early < late);
            assert_eq!(late.minute_of_day(), 540);
        }

        mod properties {
            use super::*;
            use proptest::prelude::*;

            proptest! {
                #[test]
                fn display_then_parse_roundtrips(hour in 0u8..24, minute in 0u8..60) {
                    let time = ClockTime { hour, minute };
                    let back: ClockTime = time.to_string().parse().unwrap();
                    prop_assert_eq!(back, time);
                }

                #[test]
                fn ordering_matches_minute_of_day(
                    a_hour in 0u8..24, a_minute in 0u8..60,
                    b_hour in 0u8..24, b_minute in 0u8..60,
                ) {
                    let a = ClockTime { hour: a_hour, minute: a_minute };
                    let b = ClockTime { hour: b_hour, minute: b_minute };
                    prop_assert_eq!(
                        a.cmp(&b),
                        a.minute_of_day().cmp(&b.minute_of_day())
                    );
                }
            }
        }
    }

    mod time_range_tests {
        use super::*;
        use test_case::test_case;

        #[test]
        fn parses_semicolon_separated() {
            let range: TimeRange = "08:00;18:00".parse().unwrap();
            assert_eq!(range.start, TimeBound::At(ClockTime { hour: 8, minute: 0 }));
            assert_eq!(range.stop, TimeBound::At(ClockTime { hour: 18, minute: 0 }));
        }

        #[test]
        fn parses_comma_separated() {
            let range: TimeRange = "08:00,18:00".parse().unwrap();
            assert_eq!(range.start, TimeBound::At(ClockTime { hour: 8, minute: 0 }));
        }

        #[test]
        fn semicolon_preferred_over_comma() {
            // A stray comma inside a token must not win over ';'.
            assert!("08:00;18,00".parse::<TimeRange>().is_err());
        }

        #[test]
        fn parses_never_sentinels() {
            let range: TimeRange = "09:00;never".parse().unwrap();
            assert!(!range.start.is_never());
            assert!(range.stop.is_never());

            let range: TimeRange = "never;never".parse().unwrap();
            assert!(range.start.is_never() && range.stop.is_never());
        }

        #[test]
        fn trims_whitespace_around_tokens() {
            let range: TimeRange = " 08:00 ; 18:00 ".parse().unwrap();
            assert_eq!(range.to_string(), "08:00;18:00");
        }

        #[test_case("08:00" ; "one token")]
        #[test_case("08:00;12:00;18:00" ; "three tokens")]
        #[test_case("9:99;18:00" ; "invalid minute")]
        #[test_case("08:00;noon" ; "bad stop token")]
        #[test_case("Never;18:00" ; "sentinel is lowercase only")]
        fn rejects_invalid_ranges(input: &str) {
            assert!(input.parse::<TimeRange>().is_err());
        }

        #[test]
        fn serde_roundtrip_as_string() {
            let range: TimeRange = "07:30;19:15".parse().unwrap();
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, "\"07:30;19:15\"");
            let back: TimeRange = serde_json::from_str(&json).unwrap();
            assert_eq!(back, range);
        }
    }

    mod phone_number_tests {
        use super::*;

        #[test]
        fn parse_plain_number() {
            let phone = PhoneNumber::parse("+15551234567");
            assert_eq!(phone.number, "+15551234567");
            assert!(!phone.receives_non_critical);
        }

        #[test]
        fn parse_opted_in_number() {
            let phone = PhoneNumber::parse("!+15551234567");
            assert_eq!(phone.number, "+15551234567");
            assert!(phone.receives_non_critical);
        }

        #[test]
        fn display_restores_prefix() {
            assert_eq!(PhoneNumber::parse("!+15551234567").to_string(), "!+15551234567");
            assert_eq!(PhoneNumber::parse("+15551234567").to_string(), "+15551234567");
        }
    }

    mod entry_tests {
        use super::*;

        #[test]
        fn email_entry_decodes_sentinel() {
            assert_eq!(EmailEntry::from("inherited".to_string()), EmailEntry::Inherited);
            assert_eq!(
                EmailEntry::from("ops@example.com".to_string()),
                EmailEntry::Address("ops@example.com".to_string())
            );
        }

        #[test]
        fn phone_entry_decodes_sentinel_and_prefix() {
            assert_eq!(PhoneEntry::from("inherited".to_string()), PhoneEntry::Inherited);
            let entry = PhoneEntry::from("!+4915112345678".to_string());
            match entry {
                PhoneEntry::Number(p) => {
                    assert_eq!(p.number, "+4915112345678");
                    assert!(p.receives_non_critical);
                }
                PhoneEntry::Inherited => panic!("expected a literal number"),
            }
        }
    }

    mod schedule_tests {
        use super::*;

        #[test]
        fn explicit_day_wins_over_default() {
            let mut s = schedule("office");
            s.default_range = Some("08:00;18:00".parse().unwrap());
            s.mo = Some("10:00;16:00".parse().unwrap());

            let monday = s.range_for(Weekday::Mon).unwrap();
            assert_eq!(monday.to_string(), "10:00;16:00");
            let tuesday = s.range_for(Weekday::Tue).unwrap();
            assert_eq!(tuesday.to_string(), "08:00;18:00");
        }

        #[test]
        fn no_range_when_day_and_default_absent() {
            let s = schedule("office");
            assert!(s.range_for(Weekday::Sun).is_none());
        }

        #[test]
        fn label_matching_is_trimmed_and_case_insensitive() {
            let s = schedule("Office-Hours");
            assert!(s.matches_label("office-hours"));
            assert!(s.matches_label("  OFFICE-HOURS  "));
            assert!(!s.matches_label("office"));
        }

        #[test]
        fn find_schedule_returns_first_match() {
            let config = Configuration {
                schedules: vec![schedule("night"), schedule("Office"), schedule("office")],
                master_emails: Vec::new(),
                master_phones: Vec::new(),
                description: None,
                log_level: None,
            };

            let found = config.find_schedule(" office ").unwrap();
            assert_eq!(found.name, "Office");
            assert!(config.find_schedule("weekend").is_none());
        }
    }

    mod log_level_tests {
        use super::*;

        #[test]
        fn serde_uses_lowercase_names() {
            assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
            let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
            assert_eq!(level, LogLevel::Debug);
        }

        #[test]
        fn display_matches_as_str() {
            for level in [LogLevel::Error, LogLevel::Warn, LogLevel::Info, LogLevel::Debug] {
                assert_eq!(level.to_string(), level.as_str());
            }
        }
    }
}
