//! The time-range decision engine.
//!
//! [`decide`] is a pure function of `(schedule, instant)`: it converts the
//! instant into civil time within the schedule's timezone, picks the
//! weekday's range (falling back to the schedule default), and applies the
//! start/stop rules at minute granularity. It performs no I/O, keeps no
//! state, and is safe to re-evaluate at any cadence; a missed pass
//! self-corrects on the next one.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use snooze_config::{ClockTime, Schedule, TimeBound, TimeRange};

use crate::error::{EvalError, Result};

/// The action recommended for a resource at one instant.
///
/// The engine recommends; it never acts. Callers decide whether the
/// recommendation is a no-op given the resource's observed state (e.g. a
/// `Start` for an already-running resource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The resource should be running.
    Start,
    /// The resource should be stopped.
    Stop,
    /// Neither rule fired; leave the resource alone.
    None,
}

impl Action {
    /// Returns the action as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides whether a resource governed by `schedule` should start, stop, or
/// be left alone at `instant`.
///
/// Rule order is fixed: the start rule is checked strictly before the stop
/// rule, so an instant satisfying both resolves to `Start`. A range whose
/// start side is `never` always resolves to `Stop`, including the
/// all-`never` range; that quirk of the rule ordering is load-bearing and
/// callers rely on it.
///
/// # Errors
///
/// Returns [`EvalError::InvalidTimezone`] if the schedule's zone identifier
/// does not resolve, and [`EvalError::NoScheduleForDay`] if neither the
/// weekday nor the `default` range is configured. Both are per-resource
/// conditions; callers skip the resource and continue the pass.
pub fn decide(schedule: &Schedule, instant: DateTime<Utc>) -> Result<Action> {
    if !schedule.enabled {
        debug!(schedule = %schedule.name, "skipping disabled schedule");
        return Ok(Action::None);
    }

    let tz: Tz = schedule
        .timezone
        .parse()
        .map_err(|_| EvalError::InvalidTimezone {
            schedule: schedule.name.clone(),
            timezone: schedule.timezone.clone(),
        })?;

    let civil = instant.with_timezone(&tz);
    let weekday = civil.weekday();
    let range = schedule
        .range_for(weekday)
        .ok_or_else(|| EvalError::NoScheduleForDay {
            schedule: schedule.name.clone(),
            weekday: weekday.to_string(),
        })?;

    // Minute granularity; seconds never compared.
    let now = ClockTime {
        hour: civil.hour() as u8,
        minute: civil.minute() as u8,
    };

    let action = evaluate_range(range, now);
    debug!(
        schedule = %schedule.name,
        weekday = %weekday,
        now = %now,
        range = %range,
        action = %action,
        "evaluated time range"
    );
    Ok(action)
}

/// Applies the start/stop rules for one range at one civil time.
fn evaluate_range(range: TimeRange, now: ClockTime) -> Action {
    if let TimeBound::At(start) = range.start {
        let before_stop = match range.stop {
            TimeBound::Never => true,
            TimeBound::At(stop) => now < stop,
        };
        if now >= start && before_stop {
            return Action::Start;
        }
    }

    let stop_fires = match (range.start, range.stop) {
        (TimeBound::Never, _) => true,
        (TimeBound::At(_), TimeBound::At(stop)) => now >= stop,
        (TimeBound::At(_), TimeBound::Never) => false,
    };

    if stop_fires { Action::Stop } else { Action::None }
}
