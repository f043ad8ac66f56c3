use chrono::NaiveDate;
use novaboard_core::{
    group_by_status, risk_radar, top_budgets, DashboardStats, Priority, Project, ProjectQuery,
    ProjectStatus, SortField, SortOrder, SortState,
};

fn project(
    id: &str,
    name: &str,
    owner: &str,
    status: ProjectStatus,
    priority: Priority,
    budget: f64,
    due: &str,
) -> Project {
    let mut project = Project::new(id, name);
    project.owner = owner.to_string();
    project.status = status;
    project.priority = priority;
    project.budget = budget;
    project.start_date = "2025-01-01".to_string();
    project.due_date = due.to_string();
    project
}

fn portfolio() -> Vec<Project> {
    use Priority::*;
    use ProjectStatus::*;
    vec![
        project("1", "website refresh", "Alice", InProgress, High, 5000.0, "2025-03-01"),
        project("2", "Mobile app", "Bob", Blocked, Critical, 12000.0, "2025-06-01"),
        project("3", "Audit", "alice", Completed, Critical, 800.0, "2025-01-20"),
        project("4", "Billing", "Carol", Pending, Critical, 3000.0, "2025-01-25"),
        project("5", "Analytics", "Alice", Pending, Low, 5000.0, "2025-02-15"),
    ]
}

fn ids(projects: &[&Project]) -> Vec<String> {
    projects.iter().map(|project| project.id.clone()).collect()
}

#[test]
fn default_query_sorts_by_due_date_ascending() {
    let projects = portfolio();

    let result = ProjectQuery::default().apply(&projects);

    assert_eq!(ids(&result), ["3", "4", "5", "1", "2"]);
}

#[test]
fn search_matches_name_owner_and_status_case_insensitively() {
    let projects = portfolio();

    let by_name = ProjectQuery {
        search: Some("WEB".to_string()),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_name.apply(&projects)), ["1"]);

    let by_owner = ProjectQuery {
        search: Some("alice".to_string()),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_owner.apply(&projects)), ["3", "5", "1"]);

    let by_status = ProjectQuery {
        search: Some("in progress".to_string()),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_status.apply(&projects)), ["1"]);

    let blank = ProjectQuery {
        search: Some("   ".to_string()),
        ..ProjectQuery::default()
    };
    assert_eq!(blank.apply(&projects).len(), 5);
}

#[test]
fn my_focus_overrides_owner_filter() {
    let projects = portfolio();

    let query = ProjectQuery {
        owner: Some("Bob".to_string()),
        my_focus: Some("Alice".to_string()),
        ..ProjectQuery::default()
    };

    assert_eq!(ids(&query.apply(&projects)), ["5", "1"]);
}

#[test]
fn priority_filter_is_exact() {
    let projects = portfolio();

    let query = ProjectQuery {
        priority: Some(Priority::Critical),
        ..ProjectQuery::default()
    };

    assert_eq!(ids(&query.apply(&projects)), ["3", "4", "2"]);
}

#[test]
fn budget_sort_is_numeric_and_stable() {
    let projects = portfolio();

    let asc = ProjectQuery {
        sort: SortState {
            field: SortField::Budget,
            order: SortOrder::Asc,
        },
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&asc.apply(&projects)), ["3", "4", "1", "5", "2"]);

    let desc = ProjectQuery {
        sort: asc.sort.toggle(SortField::Budget),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&desc.apply(&projects)), ["2", "1", "5", "4", "3"]);
}

#[test]
fn name_sort_ignores_case_and_enum_sorts_follow_declaration_order() {
    let projects = portfolio();

    let by_name = ProjectQuery {
        sort: SortState::default().toggle(SortField::Name),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_name.apply(&projects)), ["5", "3", "4", "2", "1"]);

    let by_status = ProjectQuery {
        sort: SortState::default().toggle(SortField::Status),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_status.apply(&projects)), ["4", "5", "1", "3", "2"]);

    let by_priority = ProjectQuery {
        sort: SortState::default().toggle(SortField::Priority),
        ..ProjectQuery::default()
    };
    assert_eq!(ids(&by_priority.apply(&projects)), ["5", "1", "2", "3", "4"]);
}

#[test]
fn group_by_status_returns_columns_in_board_order() {
    let projects = portfolio();

    let columns = group_by_status(&projects);

    let shape: Vec<(ProjectStatus, Vec<String>)> = columns
        .iter()
        .map(|(status, column)| (*status, ids(column)))
        .collect();
    assert_eq!(
        shape,
        vec![
            (ProjectStatus::Pending, vec!["4".to_string(), "5".to_string()]),
            (ProjectStatus::InProgress, vec!["1".to_string()]),
            (ProjectStatus::Completed, vec!["3".to_string()]),
            (ProjectStatus::Blocked, vec!["2".to_string()]),
        ]
    );
}

#[test]
fn dashboard_stats_count_portfolio() {
    let stats = DashboardStats::compute(&portfolio());

    assert_eq!(stats.total_projects, 5);
    assert_eq!(stats.total_budget, 25800.0);
    assert_eq!(stats.active_projects, 1);
    assert_eq!(stats.critical_projects, 2);
    assert_eq!(stats.completed_projects, 1);
    assert_eq!(stats.completion_rate, 20);
}

#[test]
fn dashboard_stats_of_empty_list_are_zero() {
    let stats = DashboardStats::compute(&[]);

    assert_eq!(stats.total_projects, 0);
    assert_eq!(stats.total_budget, 0.0);
    assert_eq!(stats.completion_rate, 0);
}

#[test]
fn completion_rate_rounds_to_nearest_percent() {
    let mut projects = portfolio();
    projects.truncate(3);

    assert_eq!(DashboardStats::compute(&projects).completion_rate, 33);
}

#[test]
fn risk_radar_flags_blocked_and_urgent_critical() {
    let projects = portfolio();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    let risks = risk_radar(&projects, today);

    // 3 is critical but completed; 4 is critical and due in 10 days.
    assert_eq!(ids(&risks), ["2", "4"]);
}

#[test]
fn risk_radar_is_capped_at_four() {
    let projects: Vec<Project> = (0..6)
        .map(|i| {
            project(
                &format!("b{i}"),
                "Stuck",
                "Ops",
                ProjectStatus::Blocked,
                Priority::Low,
                0.0,
                "",
            )
        })
        .collect();
    let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    assert_eq!(ids(&risk_radar(&projects, today)), ["b0", "b1", "b2", "b3"]);
}

#[test]
fn top_budgets_are_descending_and_capped() {
    let mut projects = portfolio();
    for i in 0..6 {
        projects.push(project(
            &format!("x{i}"),
            "Extra",
            "Ops",
            ProjectStatus::Pending,
            Priority::Low,
            f64::from(i),
            "2025-05-01",
        ));
    }

    let top = top_budgets(&projects);

    assert_eq!(top.len(), 8);
    assert_eq!(ids(&top[..5]), ["2", "1", "5", "4", "3"]);
    assert!(top.windows(2).all(|pair| pair[0].budget >= pair[1].budget));
}
