//! CSV-backed project source.

use super::{ProjectSource, SourceError, SourceResult};
use crate::codec::csv::decode_projects;
use crate::model::project::Project;
use std::path::{Path, PathBuf};

const BUNDLED_SAMPLE_CSV: &str = include_str!("../../data/sample_projects.csv");

#[derive(Debug, Clone)]
enum CsvOrigin {
    Text(String),
    File(PathBuf),
}

/// Source decoding CSV from memory or from a file read on each fetch.
#[derive(Debug, Clone)]
pub struct CsvSource {
    id: &'static str,
    origin: CsvOrigin,
}

impl CsvSource {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            id: "csv_text",
            origin: CsvOrigin::Text(text.into()),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            id: "csv_file",
            origin: CsvOrigin::File(path.as_ref().to_path_buf()),
        }
    }

    /// Sample portfolio shipped with the crate, used when nothing else is
    /// available.
    pub fn bundled_sample() -> Self {
        Self {
            id: "bundled_sample",
            origin: CsvOrigin::Text(BUNDLED_SAMPLE_CSV.to_string()),
        }
    }
}

impl ProjectSource for CsvSource {
    fn source_id(&self) -> &str {
        self.id
    }

    fn fetch(&self) -> SourceResult<Vec<Project>> {
        match &self.origin {
            CsvOrigin::Text(text) => Ok(decode_projects(text)),
            CsvOrigin::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(decode_projects(&text))
            }
        }
    }
}
