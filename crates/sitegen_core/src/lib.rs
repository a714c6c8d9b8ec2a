//! Core domain logic for the website section generator.
//! This crate is the single source of truth for project invariants and the
//! section rule table shared by the backend and the client.

pub mod db;
pub mod envelope;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sections;
pub mod service;
pub mod store;

pub use envelope::{ApiResponse, CreateProjectRequest};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::project::{parse_project_id, Project, ProjectId, ProjectValidationError};
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use sections::{derive_sections, normalize_idea, SectionTemplate};
pub use service::project_service::{ProjectService, ProjectServiceError, ServiceResult};
pub use store::{ProjectStore, SqliteProjectStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
