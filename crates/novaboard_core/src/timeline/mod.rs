//! Gantt timeline layout.
//!
//! # Responsibility
//! - Turn a project list and a zoom level into pixel geometry: span width,
//!   two tiers of calendar headers, a "today" marker and one bar per project.
//!
//! # Invariants
//! - Layout never fails; bad or missing dates degrade to the span start.
//! - Geometry is whole pixels, so each header tier tiles `total_width`
//!   exactly with no gaps or overlaps.
//! - Header tiers are finite: every calendar boundary step moves strictly
//!   forward.

mod buckets;
mod layout;
mod zoom;

pub use buckets::{Bucket, BucketIter, BucketUnit};
pub use layout::{build_timeline, build_timeline_today, GanttBar, TimelineLayout};
pub use zoom::{ParseZoomError, ZoomLevel};
