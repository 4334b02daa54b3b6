//! Time-range decision engine for scheduled resource start/stop.
//!
//! Given a validated configuration from `snooze-config`, this crate answers
//! one question per resource per tick: should it be started, stopped, or
//! left alone right now?
//!
//! - [`decide`] evaluates one schedule at one instant
//! - [`run_pass`] sweeps a whole fleet, skipping (not aborting on)
//!   per-resource problems
//!
//! Decisions are pure and stateless. The engine never tracks what it
//! decided last tick; re-evaluating the same instant yields the same
//! answer, and a missed tick self-corrects on the next one.
//!
//! # Example
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use snooze_config::Configuration;
//! use snooze_engine::{Action, decide};
//!
//! let config = Configuration::from_json(r#"{
//!     "schedules": [{
//!         "name": "office",
//!         "enabled": true,
//!         "timezone": "UTC",
//!         "default": "08:00;18:00"
//!     }]
//! }"#).unwrap();
//!
//! let noon: DateTime<Utc> = "2024-01-15T12:00:00Z".parse().unwrap();
//! let schedule = config.find_schedule("office").unwrap();
//! assert_eq!(decide(schedule, noon).unwrap(), Action::Start);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decide;
pub mod error;
pub mod pass;

pub use decide::{Action, decide};
pub use error::{EvalError, Result};
pub use pass::{PassOutcome, ResourceRef, ResourceResult, SkipReason, run_pass};
