use std::fmt;

use chrono::NaiveDateTime;

/// Fatal simulation errors, surfaced before any row is processed.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A battery configuration field is zero or negative.
    Configuration {
        /// Offending field name (e.g., `"energy_capacity_mwh"`).
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// Input timestamps are not strictly increasing.
    Ordering {
        /// Index of the offending row in the input sequence.
        index: usize,
        /// Timestamp of the preceding row.
        previous: NaiveDateTime,
        /// Timestamp of the offending row.
        timestamp: NaiveDateTime,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { field, value } => {
                write!(f, "config error: battery.{field} must be > 0, got {value}")
            }
            Self::Ordering {
                index,
                previous,
                timestamp,
            } => write!(
                f,
                "ordering error: row {index} timestamp {timestamp} is not after {previous}"
            ),
        }
    }
}

impl std::error::Error for SimError {}
