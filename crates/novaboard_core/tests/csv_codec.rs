use chrono::NaiveDate;
use novaboard_core::codec::csv::{decode_projects, encode_projects, export_file_name, CSV_COLUMNS};
use novaboard_core::{Comment, Priority, Project, ProjectStatus, Subtask};

fn sample_project(id: &str) -> Project {
    let mut project = Project::new(id, format!("Project {id}"));
    project.status = ProjectStatus::InProgress;
    project.priority = Priority::High;
    project.owner = "Alice".to_string();
    project.budget = 1250.5;
    project.start_date = "2025-01-01".to_string();
    project.due_date = "2025-03-31".to_string();
    project.description = "Quarterly rollout".to_string();
    project
}

#[test]
fn decodes_quoted_name_with_comma() {
    let text = "id,name,status,priority,owner,budget,startDate,dueDate,description,comments,subtasks\n\
                1,\"Website, v2\",Pending,High,Alice,5000,2025-01-01,2025-02-01,desc,\"[]\",\"[]\"";

    let projects = decode_projects(text);

    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.id, "1");
    assert_eq!(project.name, "Website, v2");
    assert_eq!(project.status, ProjectStatus::Pending);
    assert_eq!(project.priority, Priority::High);
    assert_eq!(project.budget, 5000.0);
    assert!(project.comments.is_empty());
    assert!(project.subtasks.is_empty());
}

#[test]
fn round_trip_preserves_nested_lists_and_special_characters() {
    let mut first = sample_project("P-1");
    first.name = "Launch \"Nova\", phase 1".to_string();
    first.description = "Line one\nLine two".to_string();
    first.comments.push(Comment {
        id: "c-1".to_string(),
        author: "Bob".to_string(),
        text: "Looks good, ship it".to_string(),
        timestamp: "2025-01-05T10:00:00.000Z".to_string(),
    });
    first.subtasks.push(Subtask {
        id: "s-1".to_string(),
        title: "Write \"release\" notes".to_string(),
        is_completed: true,
    });

    let mut second = sample_project("P-2");
    second.status = ProjectStatus::Blocked;
    second.priority = Priority::Critical;
    second.budget = 0.0;
    second.description = String::new();

    let projects = vec![first, second];
    let decoded = decode_projects(&encode_projects(&projects));

    assert_eq!(decoded, projects);
}

#[test]
fn round_trip_keeps_edge_whitespace_of_unquoted_values() {
    let mut project = Project::new("P-1", "Alpha ");
    project.owner = " Bob".to_string();
    project.description = "  indented".to_string();

    let text = encode_projects(&[project.clone()]);

    assert_eq!(decode_projects(&text), vec![project]);
}

#[test]
fn encode_writes_header_and_quotes_only_when_needed() {
    let mut project = sample_project("P-1");
    project.name = "Plain".to_string();
    project.owner = "Smith, J".to_string();
    project.description = "say \"hi\"".to_string();

    let text = encode_projects(&[project]);
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some(CSV_COLUMNS.join(",").as_str()));
    let row = lines.next().expect("data row");
    assert!(row.starts_with("P-1,Plain,In Progress,High,\"Smith, J\",1250.5,"));
    assert!(row.contains(",\"say \"\"hi\"\"\","));
    assert!(row.ends_with(",[],[]"));
    assert_eq!(lines.next(), None);
    assert!(!text.ends_with('\n'));
}

#[test]
fn encode_of_empty_list_is_empty_text() {
    assert_eq!(encode_projects(&[]), "");
}

#[test]
fn header_only_and_blank_inputs_decode_to_nothing() {
    assert!(decode_projects("").is_empty());
    assert!(decode_projects("   \n\n").is_empty());
    assert!(decode_projects(&CSV_COLUMNS.join(",")).is_empty());
    assert!(decode_projects("just one line of text").is_empty());
}

#[test]
fn short_rows_are_skipped_and_bad_json_falls_back() {
    let text = "id,name,status,priority,owner,budget,startDate,dueDate,description,comments,subtasks\n\
                1,Too short,Pending\n\
                2,Broken lists,Done,Urgent,Bob,abc,2025-01-01,2025-02-01,x,not json,\"[{\"\"id\"\":1}]\"";

    let projects = decode_projects(text);

    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.id, "2");
    assert_eq!(project.status, ProjectStatus::Pending);
    assert_eq!(project.priority, Priority::Medium);
    assert_eq!(project.budget, 0.0);
    assert!(project.comments.is_empty());
    assert!(project.subtasks.is_empty());
}

#[test]
fn columns_are_matched_by_header_name() {
    let text = "name,dueDate,id,extra\nReordered,2025-05-31,R-1,ignored";

    let projects = decode_projects(text);

    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.id, "R-1");
    assert_eq!(project.name, "Reordered");
    assert_eq!(project.due_date, "2025-05-31");
    assert_eq!(project.start_date, "2025-05-01");
    assert_eq!(project.owner, "");
}

#[test]
fn missing_id_gets_generated() {
    let text = "id,name\n,Anonymous\n,Another";

    let projects = decode_projects(text);

    assert_eq!(projects.len(), 2);
    assert!(!projects[0].id.is_empty());
    assert_ne!(projects[0].id, projects[1].id);
}

#[test]
fn crlf_line_endings_are_accepted() {
    let text = "id,name,budget\r\nA,Alpha,10\r\nB,\"Beta\r\nline\",20\r\n";

    let projects = decode_projects(text);

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].name, "Beta\r\nline");
    assert_eq!(projects[1].budget, 20.0);
}

#[test]
fn export_file_name_embeds_iso_date() {
    let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
    assert_eq!(export_file_name(date), "nova_export_2025-07-04.csv");
}
