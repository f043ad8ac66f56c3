//! Span, header and bar computation for one zoom level.

use super::buckets::{Bucket, BucketIter};
use super::zoom::ZoomLevel;
use crate::model::project::Project;
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::Serialize;

/// Bar geometry for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttBar<'a> {
    pub project: &'a Project,
    /// Start date used for layout after fallbacks.
    pub starts_on: NaiveDate,
    /// End date used for layout after fallbacks.
    pub ends_on: NaiveDate,
    pub left: i64,
    pub width: i64,
    /// Whole days between start and end, at least 1.
    pub duration_days: i64,
}

/// Complete timeline geometry for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout<'a> {
    pub zoom: ZoomLevel,
    pub span_start: NaiveDate,
    pub span_end: NaiveDate,
    pub total_days: i64,
    pub total_width: i64,
    /// Top header row (months, years or decades).
    pub primary_headers: Vec<Bucket>,
    /// Bottom header row (days, months, quarters or years).
    pub secondary_headers: Vec<Bucket>,
    /// Pixel offset of `today`; may fall outside the span.
    pub today_offset: i64,
    /// Bars ordered by start date, ties in input order.
    pub bars: Vec<GanttBar<'a>>,
}

impl TimelineLayout<'_> {
    /// Whether the today marker lands inside the drawn span.
    pub fn today_visible(&self) -> bool {
        (0..self.total_width).contains(&self.today_offset)
    }
}

/// Builds the timeline using the local calendar date as "today".
pub fn build_timeline_today(projects: &[Project], zoom: ZoomLevel) -> TimelineLayout<'_> {
    build_timeline(projects, zoom, Local::now().date_naive())
}

/// Builds the timeline for `projects` at `zoom`.
///
/// An empty list (or a list with no parseable dates) lays out a padded
/// span around `today` with headers and no bars.
pub fn build_timeline(projects: &[Project], zoom: ZoomLevel, today: NaiveDate) -> TimelineLayout<'_> {
    let px = zoom.px_per_day();
    let (span_start, span_end) = chart_span(projects, zoom, today);
    let total_days = (span_end - span_start).num_days();

    let primary_headers = BucketIter::new(zoom.primary_unit(), span_start, span_end, px).collect();
    let secondary_headers =
        BucketIter::new(zoom.secondary_unit(), span_start, span_end, px).collect();

    let mut bars: Vec<GanttBar<'_>> = projects
        .iter()
        .map(|project| bar_for(project, zoom, span_start))
        .collect();
    bars.sort_by_key(|bar| bar.starts_on);

    TimelineLayout {
        zoom,
        span_start,
        span_end,
        total_days,
        total_width: total_days * px,
        primary_headers,
        secondary_headers,
        today_offset: (today - span_start).num_days() * px,
        bars,
    }
}

/// Padded, boundary-snapped span. The end is always after the start.
fn chart_span(projects: &[Project], zoom: ZoomLevel, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let dates = projects
        .iter()
        .flat_map(|project| [project.start_on().or_else(|| project.due_on()), project.due_on()])
        .flatten();
    let (min, max) = dates.fold(None, |range: Option<(NaiveDate, NaiveDate)>, date| {
        Some(match range {
            Some((min, max)) => (min.min(date), max.max(date)),
            None => (date, date),
        })
    })
    .unwrap_or((today, today));

    let (pad_before, pad_after) = zoom.padding_days();
    let padded_start = min.checked_sub_days(Days::new(pad_before)).unwrap_or(min);
    let padded_end = max.checked_add_days(Days::new(pad_after)).unwrap_or(max);

    let (start, end) = match zoom {
        ZoomLevel::Week => {
            let back = u64::from(padded_start.weekday().num_days_from_sunday());
            let sunday = padded_start
                .checked_sub_days(Days::new(back))
                .unwrap_or(padded_start);
            (sunday, padded_end)
        }
        ZoomLevel::Month | ZoomLevel::Quarter => {
            (padded_start.with_day(1).unwrap_or(padded_start), padded_end)
        }
        ZoomLevel::Year => (
            NaiveDate::from_ymd_opt(padded_start.year(), 1, 1).unwrap_or(padded_start),
            NaiveDate::from_ymd_opt(padded_end.year(), 12, 31).unwrap_or(padded_end),
        ),
    };

    if end > start {
        (start, end)
    } else {
        (start, start.succ_opt().unwrap_or(start))
    }
}

fn bar_for(project: &Project, zoom: ZoomLevel, span_start: NaiveDate) -> GanttBar<'_> {
    let px = zoom.px_per_day();
    // Only a missing start borrows the due date; garbage text pins to the span.
    let starts_on = if project.start_date.trim().is_empty() {
        project.due_on()
    } else {
        project.start_on()
    }
    .unwrap_or(span_start);
    let ends_on = project.due_on().unwrap_or(starts_on);
    let days = (ends_on - starts_on).num_days();

    GanttBar {
        project,
        starts_on,
        ends_on,
        left: ((starts_on - span_start).num_days() * px).max(0),
        width: (days * px).max(zoom.min_bar_width()),
        duration_days: days.max(1),
    }
}
