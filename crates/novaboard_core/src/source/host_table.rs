//! Host table (spreadsheet record provider) adapter.
//!
//! # Responsibility
//! - Map loosely typed host table records onto projects by field name.
//! - Flatten rich cell values (option objects, arrays, epoch timestamps)
//!   into the plain text the model expects.
//!
//! # Invariants
//! - Every record yields one project; missing cells fall back to defaults
//!   instead of failing the whole fetch.

use super::{ProjectSource, SourceError, SourceResult};
use crate::model::project::{
    format_iso_date, parse_budget, Priority, Project, ProjectStatus, UNASSIGNED_OWNER,
};
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Numeric cells above this are epoch milliseconds, not plain numbers.
const EPOCH_MS_THRESHOLD: f64 = 1e11;

const UNTITLED_NAME: &str = "(No title)";

static ISO_DATE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})[T ]").expect("valid date prefix regex"));

/// One row as delivered by the host table API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRecord {
    pub record_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl HostRecord {
    /// Returns the first present cell among `names`.
    fn cell(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| self.fields.get(*name))
    }

    fn text(&self, names: &[&str]) -> String {
        self.cell(names).map(cell_to_text).unwrap_or_default()
    }
}

/// Source over a snapshot of host table records.
#[derive(Debug, Clone)]
pub struct HostTableSource {
    records: Vec<HostRecord>,
    today: NaiveDate,
}

impl HostTableSource {
    /// Wraps already fetched records. `today` fills missing dates.
    pub fn new(records: Vec<HostRecord>, today: NaiveDate) -> Self {
        Self { records, today }
    }

    /// Loads records exported from the host as a JSON array.
    pub fn from_json_file(path: impl AsRef<Path>, today: NaiveDate) -> SourceResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<HostRecord> =
            serde_json::from_str(&raw).map_err(|err| SourceError::Malformed(err.to_string()))?;
        Ok(Self::new(records, today))
    }

    pub fn records(&self) -> &[HostRecord] {
        &self.records
    }
}

impl ProjectSource for HostTableSource {
    fn source_id(&self) -> &str {
        "host_table"
    }

    fn fetch(&self) -> SourceResult<Vec<Project>> {
        Ok(self
            .records
            .iter()
            .map(|record| record_to_project(record, self.today))
            .collect())
    }
}

/// Converts one host record into a project.
pub fn record_to_project(record: &HostRecord, today: NaiveDate) -> Project {
    let id = Some(record.text(&["id", "ID"]))
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| record.record_id.clone());
    let name = Some(record.text(&["name", "Name", "Task"]))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNTITLED_NAME.to_string());
    let owner = Some(record.text(&["owner", "Owner"]))
        .filter(|owner| !owner.is_empty())
        .unwrap_or_else(|| UNASSIGNED_OWNER.to_string());

    let date_or_today = |names: &[&str]| {
        let raw = record.text(names);
        if raw.is_empty() {
            format_iso_date(today)
        } else {
            normalize_date_text(&raw)
        }
    };

    let mut project = Project::new(id, name);
    project.status = ProjectStatus::coerce(&record.text(&["status", "Status"]));
    project.priority = Priority::coerce(&record.text(&["priority", "Priority"]));
    project.owner = owner;
    project.budget = parse_budget(&record.text(&["budget", "Budget"]));
    project.start_date = date_or_today(&["startDate", "Start Date"]);
    project.due_date = date_or_today(&["dueDate", "Due Date"]);
    project.description = record.text(&["description", "Description"]);
    project
}

/// Flattens a cell value into display text.
///
/// Option-like objects resolve through `text`, then `name`, then `id`;
/// arrays join their non-empty parts with `", "`.
pub fn cell_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(cell_to_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => {
            if let Some(inner) = map.get("text").or_else(|| map.get("name")) {
                cell_to_text(inner)
            } else if let Some(id) = map.get("id") {
                match id {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                }
            } else {
                value.to_string()
            }
        }
    }
}

/// Normalizes host date text to `YYYY-MM-DD` where possible.
///
/// Epoch-millisecond numbers and datetime strings are reduced to their
/// calendar date; anything else is returned unchanged.
pub fn normalize_date_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<f64>() {
        if number > EPOCH_MS_THRESHOLD {
            if let Some(moment) = DateTime::from_timestamp_millis(number as i64) {
                return format_iso_date(moment.date_naive());
            }
        }
        return trimmed.to_string();
    }
    if let Some(caps) = ISO_DATE_PREFIX_RE.captures(trimmed) {
        return caps[1].to_string();
    }
    trimmed.to_string()
}
