//! Calendar buckets for timeline header rows.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One labeled header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    /// Pixel offset from the span start.
    pub left: i64,
    /// Pixel width, proportional to the days covered.
    pub width: i64,
}

/// Calendar unit a header row is cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketUnit {
    /// One cell per day, labeled with the day of month.
    Day,
    /// One cell per month, labeled `Jan`.
    MonthName,
    /// One cell per month, labeled `January 2025`.
    MonthYear,
    /// One cell per quarter, labeled `Q1`..`Q4`.
    Quarter,
    /// One cell per year, labeled `2025`.
    Year,
    /// One cell per decade, labeled `2020s`.
    Decade,
}

impl BucketUnit {
    /// First boundary of this unit strictly after `date`.
    ///
    /// Returns `None` only when no later date is representable.
    pub fn next_boundary(self, date: NaiveDate) -> Option<NaiveDate> {
        let year = date.year();
        let candidate = match self {
            Self::Day => date.succ_opt(),
            Self::MonthName | Self::MonthYear => {
                if date.month() == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, date.month() + 1, 1)
                }
            }
            Self::Quarter => {
                let next_quarter_month = (date.month0() / 3 + 1) * 3 + 1;
                if next_quarter_month > 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, next_quarter_month, 1)
                }
            }
            Self::Year => NaiveDate::from_ymd_opt(year + 1, 1, 1),
            Self::Decade => NaiveDate::from_ymd_opt(decade_of(year) + 10, 1, 1),
        };

        // Calendar arithmetic out of range degrades to a single-day step.
        candidate
            .filter(|next| *next > date)
            .or_else(|| date.succ_opt())
    }

    /// Header label of the bucket that starts at `date`.
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.day().to_string(),
            Self::MonthName => date.format("%b").to_string(),
            Self::MonthYear => date.format("%B %Y").to_string(),
            Self::Quarter => format!("Q{}", date.month0() / 3 + 1),
            Self::Year => date.year().to_string(),
            Self::Decade => format!("{}s", decade_of(date.year())),
        }
    }
}

fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

/// Lazy walk over the buckets of one header row.
///
/// Starts at `span_start`, ends at `span_end`, and clips the last bucket to
/// the span end. Each step moves the cursor strictly forward, so the walk is
/// finite for any span.
#[derive(Debug, Clone)]
pub struct BucketIter {
    unit: BucketUnit,
    span_start: NaiveDate,
    span_end: NaiveDate,
    cursor: NaiveDate,
    px_per_day: i64,
}

impl BucketIter {
    pub fn new(unit: BucketUnit, span_start: NaiveDate, span_end: NaiveDate, px_per_day: i64) -> Self {
        Self {
            unit,
            span_start,
            span_end,
            cursor: span_start,
            px_per_day,
        }
    }
}

impl Iterator for BucketIter {
    type Item = Bucket;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.span_end {
            return None;
        }

        let bucket_end = self
            .unit
            .next_boundary(self.cursor)
            .map_or(self.span_end, |next| next.min(self.span_end));
        debug_assert!(bucket_end > self.cursor, "bucket boundary must advance");

        let bucket = Bucket {
            label: self.unit.label(self.cursor),
            left: (self.cursor - self.span_start).num_days() * self.px_per_day,
            width: (bucket_end - self.cursor).num_days() * self.px_per_day,
        };
        self.cursor = bucket_end;
        Some(bucket)
    }
}
