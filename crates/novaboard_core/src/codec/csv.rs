//! CSV import/export codec for project lists.
//!
//! # Responsibility
//! - Decode CSV text (header + rows) into projects, tolerating bad rows.
//! - Encode projects with a fixed column order and minimal quoting.
//!
//! # Invariants
//! - A field is quoted iff it contains a comma, a double quote or a line
//!   break; decode accepts exactly what encode produces.
//! - Decode never fails: short input yields an empty list, short rows are
//!   skipped, bad nested JSON becomes an empty list.
//! - Encoding an empty list yields an empty string, not a header line.

use crate::model::project::{
    format_iso_date, parse_budget, Comment, Priority, Project, ProjectStatus, Subtask,
};
use chrono::{Days, NaiveDate};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use uuid::Uuid;

/// Column order of exported files.
pub const CSV_COLUMNS: [&str; 11] = [
    "id",
    "name",
    "status",
    "priority",
    "owner",
    "budget",
    "startDate",
    "dueDate",
    "description",
    "comments",
    "subtasks",
];

/// Days subtracted from `dueDate` when a row carries no `startDate`.
pub const MISSING_START_OFFSET_DAYS: u64 = 30;

/// Decodes CSV text into projects.
///
/// The first non-blank record is the header. Columns are matched by header
/// name, so column order in the input is free and unknown columns are
/// ignored.
pub fn decode_projects(text: &str) -> Vec<Project> {
    let mut records = split_records(text).into_iter();
    let Some(headers) = records.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = headers
        .into_iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut projects = Vec::new();
    for (index, fields) in records.enumerate() {
        if fields.len() < headers.len() {
            warn!(
                "event=csv_decode module=codec status=row_skipped row={} fields={} expected={}",
                index + 1,
                fields.len(),
                headers.len()
            );
            continue;
        }
        projects.push(decode_row(&headers, fields, index + 1));
    }

    projects
}

/// Encodes projects as CSV text with [`CSV_COLUMNS`] order.
///
/// Rows are joined with `\n` and the output carries no trailing newline.
pub fn encode_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(projects.len() + 1);
    lines.push(CSV_COLUMNS.join(","));
    for project in projects {
        let comments = json_field(&project.comments);
        let subtasks = json_field(&project.subtasks);
        let budget = project.budget.to_string();
        let fields: [&str; 11] = [
            &project.id,
            &project.name,
            project.status.as_str(),
            project.priority.as_str(),
            &project.owner,
            &budget,
            &project.start_date,
            &project.due_date,
            &project.description,
            &comments,
            &subtasks,
        ];
        let row = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    lines.join("\n")
}

/// File name used for exports taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("nova_export_{}.csv", format_iso_date(date))
}

fn decode_row(headers: &[String], fields: Vec<String>, row: usize) -> Project {
    let mut project = Project::new(String::new(), String::new());

    for (header, value) in headers.iter().zip(fields) {
        match header.as_str() {
            "id" => project.id = value,
            "name" => project.name = value,
            "status" => project.status = ProjectStatus::coerce(&value),
            "priority" => project.priority = Priority::coerce(&value),
            "owner" => project.owner = value,
            "budget" => project.budget = parse_budget(&value),
            "startDate" => project.start_date = value,
            "dueDate" => project.due_date = value,
            "description" => project.description = value,
            "comments" => project.comments = parse_json_list::<Comment>(&value, "comments", row),
            "subtasks" => project.subtasks = parse_json_list::<Subtask>(&value, "subtasks", row),
            _ => {}
        }
    }

    if project.id.is_empty() {
        project.id = Uuid::new_v4().to_string();
    }
    if project.start_date.is_empty() {
        if let Some(start) = project
            .due_on()
            .and_then(|due| due.checked_sub_days(Days::new(MISSING_START_OFFSET_DAYS)))
        {
            project.start_date = format_iso_date(start);
        }
    }

    project
}

fn parse_json_list<T: DeserializeOwned>(value: &str, column: &str, row: usize) -> Vec<T> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<T>>(value) {
        Ok(items) => items,
        Err(err) => {
            warn!(
                "event=csv_decode module=codec status=json_fallback row={} column={} error={}",
                row, column, err
            );
            Vec::new()
        }
    }
}

fn json_field<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
    AfterQuoted,
}

/// Splits CSV text into records of unescaped fields.
///
/// Field text is kept verbatim, including edge whitespace of unquoted fields
/// and line breaks inside quotes. Whitespace after a closing quote is
/// dropped. Blank lines produce no record.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = ScanState::FieldStart;

    let finish_field = |field: &mut String, record: &mut Vec<String>| {
        record.push(std::mem::take(field));
    };

    for ch in text.chars() {
        match state {
            ScanState::Quoted => {
                if ch == '"' {
                    state = ScanState::QuoteInQuoted;
                } else {
                    field.push(ch);
                }
            }
            ScanState::QuoteInQuoted if ch == '"' => {
                field.push('"');
                state = ScanState::Quoted;
            }
            _ => match ch {
                ',' => {
                    finish_field(&mut field, &mut record);
                    state = ScanState::FieldStart;
                }
                '\n' => {
                    finish_field(&mut field, &mut record);
                    push_record(&mut records, std::mem::take(&mut record));
                    state = ScanState::FieldStart;
                }
                '\r' => {}
                '"' if state == ScanState::FieldStart => state = ScanState::Quoted,
                c if c.is_whitespace()
                    && matches!(state, ScanState::QuoteInQuoted | ScanState::AfterQuoted) =>
                {
                    state = ScanState::AfterQuoted;
                }
                c => {
                    field.push(c);
                    if state == ScanState::FieldStart {
                        state = ScanState::Unquoted;
                    } else if state == ScanState::QuoteInQuoted {
                        state = ScanState::AfterQuoted;
                    }
                }
            },
        }
    }

    if state != ScanState::FieldStart || !field.is_empty() || !record.is_empty() {
        finish_field(&mut field, &mut record);
        push_record(&mut records, record);
    }

    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}
