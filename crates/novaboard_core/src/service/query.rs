//! List-view filtering and sorting.
//!
//! # Responsibility
//! - Apply search, owner/priority filters and "my focus" to a project list.
//! - Sort by any project column with a stable, case-insensitive order.
//! - Group projects into kanban columns.
//!
//! # Invariants
//! - Pure: inputs are never mutated, output borrows from input.
//! - Equal keys keep their input order.

use crate::model::project::{Priority, Project, ProjectStatus};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sortable project column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    Id,
    Name,
    Status,
    Priority,
    Owner,
    Budget,
    StartDate,
    #[default]
    DueDate,
    Description,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Owner => "owner",
            Self::Budget => "budget",
            Self::StartDate => "startDate",
            Self::DueDate => "dueDate",
            Self::Description => "description",
        }
    }

    fn compare(self, a: &Project, b: &Project) -> Ordering {
        match self {
            Self::Id => cmp_text(&a.id, &b.id),
            Self::Name => cmp_text(&a.name, &b.name),
            Self::Status => a.status.cmp(&b.status),
            Self::Priority => a.priority.cmp(&b.priority),
            Self::Owner => cmp_text(&a.owner, &b.owner),
            Self::Budget => a.budget.total_cmp(&b.budget),
            Self::StartDate => cmp_text(&a.start_date, &b.start_date),
            Self::DueDate => cmp_text(&a.due_date, &b.due_date),
            Self::Description => cmp_text(&a.description, &b.description),
        }
    }
}

/// Error for unknown sort field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortFieldError(String);

impl Display for ParseSortFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort field: {}", self.0)
    }
}

impl std::error::Error for ParseSortFieldError {}

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    /// Accepts column names case-insensitively, with or without the
    /// space in "start date" / "due date".
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key: String = value
            .chars()
            .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "owner" => Ok(Self::Owner),
            "budget" => Ok(Self::Budget),
            "startdate" => Ok(Self::StartDate),
            "duedate" => Ok(Self::DueDate),
            "description" => Ok(Self::Description),
            _ => Err(ParseSortFieldError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column header sort state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    /// Header click: the active column flips order, another column starts
    /// ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                order: self.order.flipped(),
            }
        } else {
            Self {
                field,
                order: SortOrder::Asc,
            }
        }
    }
}

/// Filter and sort options for list views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectQuery {
    /// Case-insensitive substring over name, owner and status label.
    pub search: Option<String>,
    pub owner: Option<String>,
    pub priority: Option<Priority>,
    /// Restricts to this user's projects; takes precedence over `owner`.
    pub my_focus: Option<String>,
    pub sort: SortState,
}

impl ProjectQuery {
    /// Returns the matching projects in sort order.
    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);
        let owner = self.my_focus.as_deref().or(self.owner.as_deref());

        let mut matched: Vec<&Project> = projects
            .iter()
            .filter(|project| owner.map_or(true, |owner| project.owner == owner))
            .filter(|project| self.priority.map_or(true, |p| project.priority == p))
            .filter(|project| {
                needle
                    .as_deref()
                    .map_or(true, |needle| matches_search(project, needle))
            })
            .collect();

        let SortState { field, order } = self.sort;
        matched.sort_by(|a, b| {
            let ordering = field.compare(a, b);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        matched
    }
}

/// Splits projects into kanban columns, one per status in board order.
pub fn group_by_status(projects: &[Project]) -> Vec<(ProjectStatus, Vec<&Project>)> {
    ProjectStatus::ALL
        .iter()
        .map(|status| {
            let column = projects
                .iter()
                .filter(|project| project.status == *status)
                .collect();
            (*status, column)
        })
        .collect()
}

fn matches_search(project: &Project, needle: &str) -> bool {
    [project.name.as_str(), project.owner.as_str(), project.status.as_str()]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{SortField, SortOrder, SortState};

    #[test]
    fn toggle_flips_same_field_and_resets_new_field() {
        let state = SortState::default();
        assert_eq!(state.field, SortField::DueDate);

        let flipped = state.toggle(SortField::DueDate);
        assert_eq!(flipped.order, SortOrder::Desc);

        let other = flipped.toggle(SortField::Budget);
        assert_eq!(other.field, SortField::Budget);
        assert_eq!(other.order, SortOrder::Asc);
    }

    #[test]
    fn sort_field_parses_header_names() {
        assert_eq!("Due Date".parse::<SortField>(), Ok(SortField::DueDate));
        assert_eq!("startDate".parse::<SortField>(), Ok(SortField::StartDate));
        assert_eq!("BUDGET".parse::<SortField>(), Ok(SortField::Budget));
        assert!("colour".parse::<SortField>().is_err());
    }
}
