//! Shared project store handle.
//!
//! # Responsibility
//! - Expose create/list/get-by-id as one object-safe contract that outer
//!   layers (HTTP handlers, tests) receive explicitly.
//! - Own the SQLite connection and serialize access to it.
//!
//! # Invariants
//! - Every call builds a fresh repository over the guarded connection, so
//!   schema readiness is checked on each operation.
//! - A poisoned lock surfaces as `Storage`, never as a panic.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::project::Project;
use crate::repo::project_repo::{RepoResult, SqliteProjectRepository};
use crate::service::project_service::{ProjectService, ProjectServiceError, ServiceResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Create/read contract over persisted projects.
pub trait ProjectStore: Send + Sync {
    /// Derives sections, persists and returns the stored project.
    fn create(&self, website_idea: &str) -> ServiceResult<Project>;
    /// Returns all projects, newest first.
    fn list_all(&self) -> ServiceResult<Vec<Project>>;
    /// Returns one project or `NotFound`; malformed ids are `Validation`.
    fn get_by_id(&self, id: &str) -> ServiceResult<Project>;
}

/// `ProjectStore` backed by a single SQLite connection.
pub struct SqliteProjectStore {
    conn: Mutex<Connection>,
}

impl SqliteProjectStore {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db(path)?),
        })
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db_in_memory()?),
        })
    }

    /// Wraps an existing connection after checking it is ready for use.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        SqliteProjectRepository::try_new(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_service<T>(
        &self,
        op: impl FnOnce(&ProjectService<SqliteProjectRepository<'_>>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ProjectServiceError::Storage("project store lock poisoned".to_string()))?;
        let repo = SqliteProjectRepository::try_new(&conn)?;
        op(&ProjectService::new(repo))
    }
}

impl ProjectStore for SqliteProjectStore {
    fn create(&self, website_idea: &str) -> ServiceResult<Project> {
        self.with_service(|service| service.create_project(website_idea))
    }

    fn list_all(&self) -> ServiceResult<Vec<Project>> {
        self.with_service(|service| service.list_projects())
    }

    fn get_by_id(&self, id: &str) -> ServiceResult<Project> {
        self.with_service(|service| service.get_project(id))
    }
}
