//! Project list persistence.
//!
//! # Responsibility
//! - Save and restore the whole project list across sessions.
//! - Keep JSON encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `save_projects` rejects lists with duplicate ids before writing.
//! - An absent key reads as `None`, distinct from a stored empty list.

use crate::db::DbError;
use crate::model::project::Project;
use crate::repo::kv_store::SqliteKvStore;
use log::{error, info};
use rusqlite::Connection;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for project list storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Two projects in one list share an id.
    DuplicateId(String),
    /// Stored value could not be decoded.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate project id: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the last-known project list.
pub trait ProjectStore {
    /// Returns the stored list, or `None` when nothing was saved yet.
    fn load_projects(&self) -> RepoResult<Option<Vec<Project>>>;
    /// Replaces the stored list.
    fn save_projects(&self, projects: &[Project]) -> RepoResult<()>;
    /// Forgets the stored list.
    fn clear(&self) -> RepoResult<()>;
}

impl<T: ProjectStore + ?Sized> ProjectStore for &T {
    fn load_projects(&self) -> RepoResult<Option<Vec<Project>>> {
        (**self).load_projects()
    }

    fn save_projects(&self, projects: &[Project]) -> RepoResult<()> {
        (**self).save_projects(projects)
    }

    fn clear(&self) -> RepoResult<()> {
        (**self).clear()
    }
}

/// SQLite-backed store keeping the list as JSON under one key.
pub struct SqliteProjectStore<'conn> {
    kv: SqliteKvStore<'conn>,
    key: String,
}

impl<'conn> SqliteProjectStore<'conn> {
    pub fn new(conn: &'conn Connection, key: impl Into<String>) -> Self {
        Self {
            kv: SqliteKvStore::new(conn),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl ProjectStore for SqliteProjectStore<'_> {
    fn load_projects(&self) -> RepoResult<Option<Vec<Project>>> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(None);
        };
        let projects: Vec<Project> = serde_json::from_str(&raw).map_err(|err| {
            error!(
                "event=projects_load module=repo status=error key={} error={}",
                self.key, err
            );
            RepoError::InvalidData(err.to_string())
        })?;
        Ok(Some(projects))
    }

    fn save_projects(&self, projects: &[Project]) -> RepoResult<()> {
        ensure_unique_ids(projects)?;
        let raw = serde_json::to_string(projects)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        self.kv.put(&self.key, &raw)?;
        info!(
            "event=projects_save module=repo status=ok key={} count={}",
            self.key,
            projects.len()
        );
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        let removed = self.kv.remove(&self.key)?;
        info!(
            "event=projects_clear module=repo status=ok key={} removed={}",
            self.key, removed
        );
        Ok(())
    }
}

/// Rejects lists where two projects share an id.
pub fn ensure_unique_ids(projects: &[Project]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen.insert(project.id.as_str()) {
            return Err(RepoError::DuplicateId(project.id.clone()));
        }
    }
    Ok(())
}
