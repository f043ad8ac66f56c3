//! Board use-case service.
//!
//! # Responsibility
//! - Provide the list/board/detail-panel mutations used by front ends.
//! - Resolve the initial project list from host, stored and sample sources.
//! - Bridge CSV import/export to the persisted list.
//!
//! # Invariants
//! - Every mutation reads the whole list, changes it, and saves it whole.
//! - Unknown ids surface as `ProjectNotFound`, never as silent no-ops.
//! - Quick-added projects are prepended so they show first.

use crate::codec::csv::{decode_projects, encode_projects};
use crate::model::project::{Priority, Project, ProjectStatus};
use crate::repo::project_store::{ProjectStore, RepoError};
use crate::source::{ProjectSource, SourceError};
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Errors from board use-cases.
#[derive(Debug)]
pub enum BoardError {
    /// Target project does not exist.
    ProjectNotFound(String),
    /// Target subtask does not exist under the project.
    SubtaskNotFound {
        project_id: String,
        subtask_id: String,
    },
    /// User input rejected before touching storage.
    InvalidInput(&'static str),
    Repo(RepoError),
    Source(SourceError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::SubtaskNotFound {
                project_id,
                subtask_id,
            } => write!(f, "subtask {subtask_id} not found in project {project_id}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SourceError> for BoardError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Where the list returned by [`ProjectBoard::bootstrap`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Host,
    Stored,
    Sample,
}

impl LoadOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Stored => "stored",
            Self::Sample => "sample",
        }
    }
}

/// Result of initial data resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub origin: LoadOrigin,
    pub projects: Vec<Project>,
}

/// Board facade over a project store.
pub struct ProjectBoard<S: ProjectStore> {
    store: S,
}

impl<S: ProjectStore> ProjectBoard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolves the working list: host records, then the stored list, then
    /// `fallback`.
    ///
    /// # Contract
    /// - A non-empty host result is persisted and wins.
    /// - Host failures are logged and skipped.
    /// - An unreadable stored list is logged and treated as absent.
    /// - The fallback result is persisted.
    pub fn bootstrap(
        &self,
        host: Option<&dyn ProjectSource>,
        fallback: &dyn ProjectSource,
    ) -> BoardResult<LoadOutcome> {
        if let Some(host) = host {
            match host.fetch() {
                Ok(projects) if !projects.is_empty() => {
                    self.store.save_projects(&projects)?;
                    info!(
                        "event=board_bootstrap module=service status=ok origin=host source={} count={}",
                        host.source_id(),
                        projects.len()
                    );
                    return Ok(LoadOutcome {
                        origin: LoadOrigin::Host,
                        projects,
                    });
                }
                Ok(_) => info!(
                    "event=board_bootstrap module=service status=empty origin=host source={}",
                    host.source_id()
                ),
                Err(err) => warn!(
                    "event=board_bootstrap module=service status=fallback origin=host source={} error={}",
                    host.source_id(),
                    err
                ),
            }
        }

        match self.store.load_projects() {
            Ok(Some(projects)) if !projects.is_empty() => {
                info!(
                    "event=board_bootstrap module=service status=ok origin=stored count={}",
                    projects.len()
                );
                return Ok(LoadOutcome {
                    origin: LoadOrigin::Stored,
                    projects,
                });
            }
            Ok(_) => {}
            Err(RepoError::InvalidData(message)) => warn!(
                "event=board_bootstrap module=service status=fallback origin=stored error={}",
                message
            ),
            Err(err) => return Err(err.into()),
        }

        let projects = fallback.fetch()?;
        self.store.save_projects(&projects)?;
        info!(
            "event=board_bootstrap module=service status=ok origin=sample source={} count={}",
            fallback.source_id(),
            projects.len()
        );
        Ok(LoadOutcome {
            origin: LoadOrigin::Sample,
            projects,
        })
    }

    /// Returns the stored list, or an empty list when nothing is stored.
    pub fn projects(&self) -> BoardResult<Vec<Project>> {
        Ok(self.store.load_projects()?.unwrap_or_default())
    }

    /// Gets one project by id.
    pub fn get(&self, id: &str) -> BoardResult<Project> {
        self.projects()?
            .into_iter()
            .find(|project| project.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))
    }

    /// Creates a project from a board column's quick-add box.
    pub fn quick_add(
        &self,
        name: &str,
        status: ProjectStatus,
        owner: &str,
        today: NaiveDate,
    ) -> BoardResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::InvalidInput("project name must not be blank"));
        }

        let project = Project::quick_add(name, status, owner, today);
        let mut projects = self.projects()?;
        projects.insert(0, project.clone());
        self.store.save_projects(&projects)?;
        info!(
            "event=project_create module=service status=ok id={}",
            project.id
        );
        Ok(project)
    }

    /// Replaces a project record wholesale, matched by id.
    pub fn replace(&self, updated: Project) -> BoardResult<()> {
        self.update_project(&updated.id.clone(), move |project| {
            *project = updated;
            Ok(())
        })
    }

    /// Moves a project to another board column.
    pub fn move_status(&self, id: &str, status: ProjectStatus) -> BoardResult<Project> {
        self.update_project(id, |project| {
            project.status = status;
            Ok(project.clone())
        })
    }

    /// Advances priority one step in cycle order and returns the new value.
    pub fn cycle_priority(&self, id: &str) -> BoardResult<Priority> {
        self.update_project(id, |project| {
            project.priority = project.priority.next();
            Ok(project.priority)
        })
    }

    /// Removes a project permanently.
    pub fn delete(&self, id: &str) -> BoardResult<()> {
        let mut projects = self.projects()?;
        let before = projects.len();
        projects.retain(|project| project.id != id);
        if projects.len() == before {
            return Err(BoardError::ProjectNotFound(id.to_string()));
        }
        self.store.save_projects(&projects)?;
        info!("event=project_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Appends a comment and returns its id.
    pub fn add_comment(
        &self,
        id: &str,
        author: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> BoardResult<String> {
        self.update_project(id, |project| {
            project
                .add_comment(author, text, now)
                .ok_or(BoardError::InvalidInput("comment text must not be blank"))
        })
    }

    /// Appends a subtask and returns its id.
    pub fn add_subtask(&self, id: &str, title: &str) -> BoardResult<String> {
        self.update_project(id, |project| {
            project
                .add_subtask(title)
                .ok_or(BoardError::InvalidInput("subtask title must not be blank"))
        })
    }

    /// Flips a subtask and returns its new completion state.
    pub fn toggle_subtask(&self, id: &str, subtask_id: &str) -> BoardResult<bool> {
        self.update_project(id, |project| {
            if !project.toggle_subtask(subtask_id) {
                return Err(subtask_not_found(id, subtask_id));
            }
            Ok(project
                .subtasks
                .iter()
                .any(|st| st.id == subtask_id && st.is_completed))
        })
    }

    pub fn delete_subtask(&self, id: &str, subtask_id: &str) -> BoardResult<()> {
        self.update_project(id, |project| {
            if project.delete_subtask(subtask_id) {
                Ok(())
            } else {
                Err(subtask_not_found(id, subtask_id))
            }
        })
    }

    /// Replaces the whole list with the projects decoded from `text`.
    ///
    /// A file that decodes to no projects is rejected so an empty or broken
    /// file cannot wipe the board.
    pub fn import_csv(&self, text: &str) -> BoardResult<usize> {
        let projects = decode_projects(text);
        if projects.is_empty() {
            return Err(BoardError::InvalidInput("csv contains no projects"));
        }
        self.store.save_projects(&projects)?;
        info!(
            "event=csv_import module=service status=ok count={}",
            projects.len()
        );
        Ok(projects.len())
    }

    /// Encodes the stored list as CSV.
    pub fn export_csv(&self) -> BoardResult<String> {
        let projects = self.projects()?;
        info!(
            "event=csv_export module=service status=ok count={}",
            projects.len()
        );
        Ok(encode_projects(&projects))
    }

    /// Drops the stored list and reloads it from `fallback`.
    pub fn reset(&self, fallback: &dyn ProjectSource) -> BoardResult<Vec<Project>> {
        self.store.clear()?;
        let projects = fallback.fetch()?;
        self.store.save_projects(&projects)?;
        info!(
            "event=board_reset module=service status=ok source={} count={}",
            fallback.source_id(),
            projects.len()
        );
        Ok(projects)
    }

    fn update_project<T>(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Project) -> BoardResult<T>,
    ) -> BoardResult<T> {
        let mut projects = self.projects()?;
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(|| BoardError::ProjectNotFound(id.to_string()))?;
        let output = apply(project)?;
        self.store.save_projects(&projects)?;
        Ok(output)
    }
}

fn subtask_not_found(project_id: &str, subtask_id: &str) -> BoardError {
    BoardError::SubtaskNotFound {
        project_id: project_id.to_string(),
        subtask_id: subtask_id.to_string(),
    }
}
