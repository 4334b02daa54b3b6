//! Error types for schedule evaluation.

use thiserror::Error;

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Per-resource evaluation failures.
///
/// Both variants are non-fatal to an evaluation pass: the caller logs them,
/// treats the resource as "no action", and continues with the rest of the
/// fleet. They are distinct so operators can tell a typo'd zone name from a
/// legitimately configured day off.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The schedule's timezone identifier does not resolve to a known zone.
    #[error("unresolvable timezone '{timezone}' in schedule '{schedule}'")]
    InvalidTimezone {
        /// Name of the schedule being evaluated.
        schedule: String,
        /// The identifier that failed to resolve.
        timezone: String,
    },

    /// Neither an explicit day range nor a default is configured for the
    /// evaluation weekday.
    #[error("schedule '{schedule}' has no time range for {weekday}")]
    NoScheduleForDay {
        /// Name of the schedule being evaluated.
        schedule: String,
        /// The civil weekday that had no range.
        weekday: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_timezone() {
        let err = EvalError::InvalidTimezone {
            schedule: "office".into(),
            timezone: "Not/AZone".into(),
        };
        assert_eq!(
            err.to_string(),
            "unresolvable timezone 'Not/AZone' in schedule 'office'"
        );
    }

    #[test]
    fn error_display_no_schedule_for_day() {
        let err = EvalError::NoScheduleForDay {
            schedule: "office".into(),
            weekday: "Sun".into(),
        };
        assert!(err.to_string().contains("no time range for Sun"));
    }
}
