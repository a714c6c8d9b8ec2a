//! Project use-case service.
//!
//! # Responsibility
//! - Create projects (derive sections, assign identity, persist, read back).
//! - Serve list and get-by-id reads.
//! - Map repository failures onto `Validation` / `Storage`; absent rows
//!   become `NotFound`.
//!
//! # Invariants
//! - A created project is returned as read back from storage, never as the
//!   in-memory value that was written.
//! - Service layer remains storage-agnostic.

use crate::model::project::{parse_project_id, Project, ProjectValidationError};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use log::{info, warn};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ProjectServiceError>;

/// Public error taxonomy for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(#[from] ProjectValidationError),
    /// No project has the requested id.
    #[error("Project not found")]
    NotFound(String),
    /// The underlying store failed or is unreachable.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Project service facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one project from a website idea.
    pub fn create_project(&self, website_idea: &str) -> ServiceResult<Project> {
        let project = Project::new(website_idea)?;
        let id = self.repo.insert_project(&project)?;
        let stored = self.repo.get_project(id)?.ok_or_else(|| {
            ProjectServiceError::Storage("created project not found in read-back".to_string())
        })?;

        info!(
            "event=project_create module=service status=ok project_id={} section_count={}",
            stored.id,
            stored.sections.len()
        );
        Ok(stored)
    }

    /// Lists all projects, newest first.
    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.repo.list_projects()?)
    }

    /// Gets one project by its textual id.
    ///
    /// # Errors
    /// - `Validation` when `id` is not a well-formed identifier.
    /// - `NotFound` when no project has that id.
    pub fn get_project(&self, id: &str) -> ServiceResult<Project> {
        let project_id = parse_project_id(id)?;
        match self.repo.get_project(project_id)? {
            Some(project) => Ok(project),
            None => {
                warn!("event=project_get module=service status=not_found project_id={project_id}");
                Err(ProjectServiceError::NotFound(project_id.to_string()))
            }
        }
    }
}
