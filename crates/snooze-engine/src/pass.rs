//! Fleet-wide evaluation passes.
//!
//! [`run_pass`] evaluates every resource in a fleet against one frozen
//! configuration at one instant. Per-resource problems (missing label,
//! unknown schedule, bad timezone) downgrade that resource to a skip and
//! the pass continues; a single misconfigured resource never blocks the
//! rest of the fleet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use snooze_config::Configuration;

use crate::decide::{Action, decide};
use crate::error::EvalError;

/// A managed resource as seen by the evaluation pass: an identifier plus
/// the schedule label it carries, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Stable identifier of the resource (instance id, VM name, ...).
    pub id: String,
    /// The schedule label attached to the resource, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_label: Option<String>,
}

impl ResourceRef {
    /// Creates an unlabeled resource reference.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schedule_label: None,
        }
    }

    /// Creates a resource reference bound to a schedule label.
    #[must_use]
    pub fn with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            schedule_label: Some(label.into()),
        }
    }
}

/// Why a resource produced no decision during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// The resource carries no schedule label.
    MissingLabel,
    /// The resource's label matches no configured schedule.
    UnknownSchedule {
        /// The label that failed to match.
        label: String,
    },
    /// The matched schedule is disabled.
    Disabled {
        /// Name of the disabled schedule.
        schedule: String,
    },
    /// The matched schedule has no range for the evaluation weekday.
    NoScheduleForDay {
        /// Name of the schedule.
        schedule: String,
        /// The civil weekday that had no range.
        weekday: String,
    },
    /// The matched schedule's timezone does not resolve.
    InvalidTimezone {
        /// Name of the schedule.
        schedule: String,
        /// The identifier that failed to resolve.
        timezone: String,
    },
}

impl From<EvalError> for SkipReason {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::InvalidTimezone { schedule, timezone } => {
                Self::InvalidTimezone { schedule, timezone }
            }
            EvalError::NoScheduleForDay { schedule, weekday } => {
                Self::NoScheduleForDay { schedule, weekday }
            }
        }
    }
}

/// The per-resource outcome of an evaluation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceResult {
    /// The schedule evaluated cleanly to an action.
    Decided(Action),
    /// The resource was skipped; the reason says why.
    Skipped(SkipReason),
}

/// One resource's entry in a pass report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    /// The resource that was evaluated.
    pub resource: ResourceRef,
    /// What the pass concluded for it.
    pub result: ResourceResult,
}

/// Evaluates every resource against `config` at `instant`.
///
/// Output order matches input order and every resource appears exactly
/// once. Skips are logged at `warn` (misconfiguration) or `debug`
/// (expected states like a disabled schedule) and never abort the pass.
#[must_use]
pub fn run_pass(
    config: &Configuration,
    resources: &[ResourceRef],
    instant: DateTime<Utc>,
) -> Vec<PassOutcome> {
    resources
        .iter()
        .map(|resource| PassOutcome {
            resource: resource.clone(),
            result: evaluate_resource(config, resource, instant),
        })
        .collect()
}

fn evaluate_resource(
    config: &Configuration,
    resource: &ResourceRef,
    instant: DateTime<Utc>,
) -> ResourceResult {
    let Some(label) = resource.schedule_label.as_deref() else {
        debug!(resource = %resource.id, "resource carries no schedule label");
        return ResourceResult::Skipped(SkipReason::MissingLabel);
    };

    let Some(schedule) = config.find_schedule(label) else {
        warn!(resource = %resource.id, label, "no schedule matches label");
        return ResourceResult::Skipped(SkipReason::UnknownSchedule {
            label: label.to_string(),
        });
    };

    if !schedule.enabled {
        debug!(resource = %resource.id, schedule = %schedule.name, "schedule disabled");
        return ResourceResult::Skipped(SkipReason::Disabled {
            schedule: schedule.name.clone(),
        });
    }

    match decide(schedule, instant) {
        Ok(action) => {
            debug!(resource = %resource.id, schedule = %schedule.name, action = %action, "decided");
            ResourceResult::Decided(action)
        }
        Err(err) => {
            warn!(resource = %resource.id, error = %err, "skipping resource");
            ResourceResult::Skipped(err.into())
        }
    }
}
