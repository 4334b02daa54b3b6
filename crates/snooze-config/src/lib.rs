//! Schedule configuration model and fail-closed validator for Snooze.
//!
//! `snooze-config` owns the boundary between the loosely-typed configuration
//! document (one JSON blob per evaluation pass) and the strongly typed model
//! consumed by the decision engine and the notification resolver. The wire
//! format's string sentinels (`"never"` range sides, `"inherited"` list
//! entries, the `!` non-critical opt-in prefix on phone numbers) are decoded
//! here and nowhere else.
//!
//! # Validation contract
//!
//! [`Configuration::from_json`] (or [`Configuration::from_value`] /
//! [`Configuration::from_raw`]) is fail-closed: if any schedule, time range,
//! email address, or phone number is malformed, the whole document is
//! rejected and no resources are processed against it. Timezone identifiers
//! are the deliberate exception: only non-emptiness is checked statically,
//! and resolution happens per evaluation so a single typo'd zone skips one
//! resource instead of invalidating the configuration.
//!
//! # Example
//!
//! ```rust
//! use snooze_config::Configuration;
//!
//! let config = Configuration::from_json(r#"{
//!     "masterEmails": ["ops@example.com"],
//!     "schedules": [
//!         {
//!             "name": "office-hours",
//!             "enabled": true,
//!             "timezone": "Europe/Berlin",
//!             "default": "08:00;18:00",
//!             "sa": "never;never",
//!             "emails": ["inherited"]
//!         }
//!     ]
//! }"#).unwrap();
//!
//! let schedule = config.find_schedule(" Office-Hours ").unwrap();
//! assert!(schedule.enabled);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod raw;
pub mod types;
mod validate;

pub use error::{ConfigError, Result};
pub use raw::{RawConfiguration, RawSchedule};
pub use types::{
    ClockTime, Configuration, EmailEntry, INHERITED, LogLevel, NEVER, PhoneEntry, PhoneNumber,
    Schedule, TimeBound, TimeRange,
};
pub use validate::{is_valid_email, is_valid_phone};
