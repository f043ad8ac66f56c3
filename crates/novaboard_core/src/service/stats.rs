//! Dashboard metrics.

use crate::model::project::{Priority, Project, ProjectStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// Critical projects due in fewer than this many days are at risk.
pub const RISK_WINDOW_DAYS: i64 = 15;
pub const RISK_RADAR_LIMIT: usize = 4;
pub const TOP_BUDGET_LIMIT: usize = 8;

/// Headline counters for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub total_budget: f64,
    /// Projects in progress.
    pub active_projects: usize,
    /// Critical projects not yet completed.
    pub critical_projects: usize,
    pub completed_projects: usize,
    /// Rounded completed share in percent; 0 for an empty list.
    pub completion_rate: u32,
}

impl DashboardStats {
    pub fn compute(projects: &[Project]) -> Self {
        let count = |pred: fn(&Project) -> bool| projects.iter().filter(|p| pred(p)).count();
        let total_projects = projects.len();
        let completed_projects = count(|p| p.status == ProjectStatus::Completed);
        let completion_rate = if total_projects == 0 {
            0
        } else {
            (completed_projects as f64 * 100.0 / total_projects as f64).round() as u32
        };

        Self {
            total_projects,
            total_budget: projects.iter().map(|p| p.budget).sum(),
            active_projects: count(|p| p.status == ProjectStatus::InProgress),
            critical_projects: count(|p| {
                p.priority == Priority::Critical && p.status != ProjectStatus::Completed
            }),
            completed_projects,
            completion_rate,
        }
    }
}

/// Projects needing attention: blocked ones, and unfinished critical ones
/// due within [`RISK_WINDOW_DAYS`]. At most [`RISK_RADAR_LIMIT`], in input
/// order.
pub fn risk_radar(projects: &[Project], today: NaiveDate) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| {
            let urgent = project.status != ProjectStatus::Completed
                && project
                    .due_on()
                    .is_some_and(|due| (due - today).num_days() < RISK_WINDOW_DAYS);
            project.status == ProjectStatus::Blocked
                || (project.priority == Priority::Critical && urgent)
        })
        .take(RISK_RADAR_LIMIT)
        .collect()
}

/// The [`TOP_BUDGET_LIMIT`] largest budgets, largest first.
pub fn top_budgets(projects: &[Project]) -> Vec<&Project> {
    let mut ranked: Vec<&Project> = projects.iter().collect();
    ranked.sort_by(|a, b| b.budget.total_cmp(&a.budget));
    ranked.truncate(TOP_BUDGET_LIMIT);
    ranked
}
