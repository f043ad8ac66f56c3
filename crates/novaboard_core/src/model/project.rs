//! Project domain model.
//!
//! # Responsibility
//! - Define the project record with its comment and subtask children.
//! - Coerce free-text status/priority input into the fixed enumerations.
//! - Provide detail-panel mutations (comments, subtasks) on one record.
//!
//! # Invariants
//! - `status` and `priority` are always a known variant; unknown text maps
//!   to `Pending` / `Medium`.
//! - Dates are kept as the text they arrived in so CSV/JSON round-trips are
//!   exact; parsing happens on demand and tolerates bad input.
//! - Comments are append-only; subtasks keep insertion order.

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Canonical date format used on every wire surface.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Days between start and due date for projects created by quick-add.
pub const QUICK_ADD_DURATION_DAYS: u64 = 30;

/// Owner label for projects nobody has claimed.
pub const UNASSIGNED_OWNER: &str = "Unassigned";

/// Board column / lifecycle state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum ProjectStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl ProjectStatus {
    /// All statuses in board column order.
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Pending,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Blocked,
    ];

    /// Wire label, e.g. `In Progress`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }

    /// Strict parse of a wire label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Pending" => Some(Self::Pending),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "Blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Lenient parse used by import paths; unknown input becomes `Pending`.
    pub fn coerce(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        Self::coerce(&value)
    }
}

impl From<ProjectStatus> for &'static str {
    fn from(value: ProjectStatus) -> Self {
        value.as_str()
    }
}

/// Project priority, totally ordered from `Low` to `Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "&'static str")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Lenient parse used by import paths; unknown input becomes `Medium`.
    pub fn coerce(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Next priority in cycle order; `Critical` wraps to `Low`.
    pub fn next(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Critical,
            Self::Critical => Self::Low,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::coerce(&value)
    }
}

impl From<Priority> for &'static str {
    fn from(value: Priority) -> Self {
        value.as_str()
    }
}

/// One entry of a project's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub text: String,
    /// RFC 3339 timestamp text.
    pub timestamp: String,
}

/// Checklist item under a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

/// Canonical project record.
///
/// Serialized with camelCase field names (`startDate`, `dueDate`) so the
/// persisted JSON matches the CSV header names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Project {
    /// Creates an empty project with the given id and name.
    ///
    /// Dates are empty; callers fill the fields they know.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: ProjectStatus::default(),
            priority: Priority::default(),
            owner: String::new(),
            budget: 0.0,
            start_date: String::new(),
            due_date: String::new(),
            description: String::new(),
            comments: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    /// Creates a project from board quick-add input.
    ///
    /// # Contract
    /// - Generates a fresh id.
    /// - Priority `Medium`, budget `0`.
    /// - Starts `today`, due [`QUICK_ADD_DURATION_DAYS`] later.
    pub fn quick_add(
        name: impl Into<String>,
        status: ProjectStatus,
        owner: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        let due = today
            .checked_add_days(Days::new(QUICK_ADD_DURATION_DAYS))
            .unwrap_or(today);
        let mut project = Self::new(Uuid::new_v4().to_string(), name);
        project.status = status;
        project.owner = owner.into();
        project.start_date = format_iso_date(today);
        project.due_date = format_iso_date(due);
        project
    }

    /// Parsed start date, if the stored text is a valid date.
    pub fn start_on(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.start_date)
    }

    /// Parsed due date, if the stored text is a valid date.
    pub fn due_on(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.due_date)
    }

    /// Appends a comment and returns its id.
    ///
    /// Returns `None` (and leaves the thread untouched) for blank text.
    pub fn add_comment(
        &mut self,
        author: impl Into<String>,
        text: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        self.comments.push(Comment {
            id: id.clone(),
            author: author.into(),
            text: text.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        Some(id)
    }

    /// Appends an incomplete subtask and returns its id.
    ///
    /// Returns `None` for blank titles.
    pub fn add_subtask(&mut self, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        self.subtasks.push(Subtask {
            id: id.clone(),
            title: title.to_string(),
            is_completed: false,
        });
        Some(id)
    }

    /// Flips completion of one subtask. Returns whether the id matched.
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter_mut().find(|st| st.id == subtask_id) {
            Some(subtask) => {
                subtask.is_completed = !subtask.is_completed;
                true
            }
            None => false,
        }
    }

    /// Removes one subtask. Returns whether the id matched.
    pub fn delete_subtask(&mut self, subtask_id: &str) -> bool {
        let before = self.subtasks.len();
        self.subtasks.retain(|st| st.id != subtask_id);
        self.subtasks.len() != before
    }

    /// Returns `(completed, total)` subtask counts.
    pub fn subtask_progress(&self) -> (usize, usize) {
        let completed = self.subtasks.iter().filter(|st| st.is_completed).count();
        (completed, self.subtasks.len())
    }
}

/// Parses an ISO calendar date.
///
/// Accepts `YYYY-MM-DD` and datetime text whose first ten characters are a
/// date (`2025-01-10T08:00:00Z`). Returns `None` for anything else.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Some(date);
    }
    trimmed
        .get(..10)
        .filter(|_| trimmed.len() > 10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT).ok())
}

/// Parses budget text leniently.
///
/// Anything but a finite, non-negative number becomes `0`.
pub fn parse_budget(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget >= 0.0 => budget,
        _ => 0.0,
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_budget, parse_iso_date, Priority, ProjectStatus};
    use chrono::NaiveDate;

    #[test]
    fn priority_cycle_wraps_once_per_call() {
        assert_eq!(Priority::Low.next(), Priority::Medium);
        assert_eq!(Priority::Medium.next(), Priority::High);
        assert_eq!(Priority::High.next(), Priority::Critical);
        assert_eq!(Priority::Critical.next(), Priority::Low);
    }

    #[test]
    fn unknown_labels_coerce_to_defaults() {
        assert_eq!(ProjectStatus::coerce("Archived"), ProjectStatus::Pending);
        assert_eq!(ProjectStatus::coerce(" In Progress "), ProjectStatus::InProgress);
        assert_eq!(Priority::coerce("urgent"), Priority::Medium);
        assert_eq!(Priority::coerce("Critical"), Priority::Critical);
    }

    #[test]
    fn parse_iso_date_accepts_datetime_prefix() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 10);
        assert_eq!(parse_iso_date("2025-01-10"), expected);
        assert_eq!(parse_iso_date("2025-01-10T08:30:00Z"), expected);
        assert_eq!(parse_iso_date("10/01/2025"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn budget_falls_back_to_zero() {
        assert_eq!(parse_budget("5000"), 5000.0);
        assert_eq!(parse_budget(" 12.5 "), 12.5);
        assert_eq!(parse_budget("abc"), 0.0);
        assert_eq!(parse_budget(""), 0.0);
        assert_eq!(parse_budget("-3"), 0.0);
        assert_eq!(parse_budget("NaN"), 0.0);
    }
}
