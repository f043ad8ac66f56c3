//! Record sources that produce project lists.
//!
//! # Responsibility
//! - Define the provider contract used by board bootstrap.
//! - Adapt CSV text and host table records into canonical projects.
//!
//! # Invariants
//! - Sources return fully normalized projects (known status/priority,
//!   non-empty ids); callers never patch source output.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod csv_source;
pub mod host_table;

pub use csv_source::CsvSource;
pub use host_table::{HostRecord, HostTableSource};

use crate::model::project::Project;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain records from a source.
#[derive(Debug)]
pub enum SourceError {
    /// Backing file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Payload was read but is not in the expected shape.
    Malformed(String),
    /// Source is not reachable in this context.
    Unavailable(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Malformed(message) => write!(f, "malformed source data: {message}"),
            Self::Unavailable(message) => write!(f, "source unavailable: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed(_) | Self::Unavailable(_) => None,
        }
    }
}

/// Provider of a project list.
pub trait ProjectSource {
    /// Short stable id used in logs (`csv`, `host_table`, ...).
    fn source_id(&self) -> &str;
    fn fetch(&self) -> SourceResult<Vec<Project>>;
}
