//! Zoom levels and their scale constants.

use super::buckets::BucketUnit;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Calendar granularity of the timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 4] = [
        ZoomLevel::Week,
        ZoomLevel::Month,
        ZoomLevel::Quarter,
        ZoomLevel::Year,
    ];

    /// Horizontal scale in pixels per calendar day.
    pub fn px_per_day(self) -> i64 {
        match self {
            Self::Week => 40,
            Self::Month => 10,
            Self::Quarter => 3,
            Self::Year => 1,
        }
    }

    /// Narrowest bar drawn, so zero-length projects stay visible.
    pub fn min_bar_width(self) -> i64 {
        match self {
            Self::Year => 2,
            _ => 10,
        }
    }

    /// Days of padding before the earliest and after the latest date.
    pub fn padding_days(self) -> (u64, u64) {
        match self {
            Self::Year => (90, 180),
            _ => (15, 30),
        }
    }

    /// Unit of the top header row.
    pub fn primary_unit(self) -> BucketUnit {
        match self {
            Self::Week => BucketUnit::MonthYear,
            Self::Month | Self::Quarter => BucketUnit::Year,
            Self::Year => BucketUnit::Decade,
        }
    }

    /// Unit of the bottom header row.
    pub fn secondary_unit(self) -> BucketUnit {
        match self {
            Self::Week => BucketUnit::Day,
            Self::Month => BucketUnit::MonthName,
            Self::Quarter => BucketUnit::Quarter,
            Self::Year => BucketUnit::Year,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// View switcher label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Week View",
            Self::Month => "Month View",
            Self::Quarter => "Quarter View",
            Self::Year => "Year View",
        }
    }
}

impl Display for ZoomLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when zoom text is not one of `week|month|quarter|year`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseZoomError(pub String);

impl Display for ParseZoomError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported zoom level `{}`; expected week|month|quarter|year",
            self.0
        )
    }
}

impl Error for ParseZoomError {}

impl FromStr for ZoomLevel {
    type Err = ParseZoomError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(ParseZoomError(other.to_string())),
        }
    }
}
