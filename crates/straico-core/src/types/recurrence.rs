//! Recurrence intervals for scheduled jobs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const HOUR: u64 = 3600;

/// How often a scheduled job repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// Every hour.
    Hourly,
    /// Every twelve hours.
    TwiceDaily,
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// Every `n` hours, `n > 0`.
    EveryHours(u32),
}

impl Recurrence {
    /// Interval between two runs.
    pub fn interval(&self) -> Duration {
        let hours = match self {
            Self::Hourly => 1,
            Self::TwiceDaily => 12,
            Self::Daily => 24,
            Self::Weekly => 24 * 7,
            Self::EveryHours(n) => u64::from(*n),
        };
        Duration::from_secs(hours * HOUR)
    }

    /// Build a recurrence back from a stored interval in seconds.
    pub fn from_interval_secs(secs: u64) -> Result<Self, AppError> {
        if secs == 0 || secs % HOUR != 0 {
            return Err(AppError::validation(format!(
                "Interval of {secs}s is not a whole number of hours"
            )));
        }
        let hours = secs / HOUR;
        Ok(match hours {
            1 => Self::Hourly,
            12 => Self::TwiceDaily,
            24 => Self::Daily,
            168 => Self::Weekly,
            n => Self::EveryHours(u32::try_from(n).map_err(|_| {
                AppError::validation(format!("Interval of {n} hours is out of range"))
            })?),
        })
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly => write!(f, "hourly"),
            Self::TwiceDaily => write!(f, "twicedaily"),
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::EveryHours(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Recurrence {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "hourly" => Ok(Self::Hourly),
            "twicedaily" => Ok(Self::TwiceDaily),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            other => match other.parse::<u32>() {
                Ok(0) | Err(_) => Err(AppError::validation(format!(
                    "Unknown recurrence '{s}'. Supported: hourly, twicedaily, daily, weekly, or a number of hours"
                ))),
                Ok(n) => Ok(Self::EveryHours(n)),
            },
        }
    }
}
