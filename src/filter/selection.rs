//! Filter selection
//!
//! The user-controlled part of the dashboard: which application and
//! which time range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key used for the "every application" selection
pub const ALL_APPS_KEY: &str = "all";

/// Errors raised while building a filter from user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid time range: {0} days (expected 1, 7, 30 or 90)")]
    InvalidTimeRange(u32),

    #[error("Invalid time range: {0:?}")]
    Unparsable(String),
}

/// Selectable time ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeRange {
    Last24Hours,
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Last24Hours,
        TimeRange::Last7Days,
        TimeRange::Last30Days,
        TimeRange::Last90Days,
    ];

    pub fn days(self) -> u32 {
        match self {
            TimeRange::Last24Hours => 1,
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
            TimeRange::Last90Days => 90,
        }
    }

    pub fn duration(self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.days()))
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Last24Hours => "Last 24 hours",
            TimeRange::Last7Days => "Last 7 days",
            TimeRange::Last30Days => "Last 30 days",
            TimeRange::Last90Days => "Last 90 days",
        }
    }
}

impl TryFrom<u32> for TimeRange {
    type Error = FilterError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(TimeRange::Last24Hours),
            7 => Ok(TimeRange::Last7Days),
            30 => Ok(TimeRange::Last30Days),
            90 => Ok(TimeRange::Last90Days),
            other => Err(FilterError::InvalidTimeRange(other)),
        }
    }
}

impl From<TimeRange> for u32 {
    fn from(range: TimeRange) -> Self {
        range.days()
    }
}

impl FromStr for TimeRange {
    type Err = FilterError;

    /// Accepts `7` as well as `7d`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('d').unwrap_or(trimmed);
        let days: u32 = digits
            .parse()
            .map_err(|_| FilterError::Unparsable(s.to_string()))?;
        TimeRange::try_from(days)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which application the dashboard is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AppSelection {
    #[default]
    All,
    /// Synthetic key of one application
    App(String),
}

impl AppSelection {
    /// `"all"` selects everything, anything else is a synthetic key
    pub fn from_key(key: &str) -> Self {
        if key == ALL_APPS_KEY {
            AppSelection::All
        } else {
            AppSelection::App(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            AppSelection::All => ALL_APPS_KEY,
            AppSelection::App(key) => key,
        }
    }
}

impl FromStr for AppSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AppSelection::from_key(s))
    }
}

/// Current filter state read by both fetchers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub app: AppSelection,
    pub time_range: TimeRange,
}

impl FilterSelection {
    pub fn new(app: AppSelection, time_range: TimeRange) -> Self {
        Self { app, time_range }
    }
}
