//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/get/list APIs over the `projects` table.
//! - Keep SQL and the stored document encoding inside the core boundary.
//!
//! # Invariants
//! - Connections must be migrated to the latest schema before use.
//! - `sections` is stored as a JSON array of strings.
//! - List order is `created_at DESC`, ties broken by newest insertion.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::project::{Project, ProjectId, ProjectValidationError};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    website_idea,
    sections,
    created_at
FROM projects";

const REQUIRED_PROJECT_COLUMNS: &[&str] = &["id", "website_idea", "sections", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(#[from] ProjectValidationError),
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("invalid persisted project data: {0}")]
    InvalidData(String),
    #[error(
        "connection is not initialized: schema version {actual_version}, expected {expected_version}"
    )]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Inserts a fully-formed project and returns its id.
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId>;
    /// Gets one project by id.
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Lists every project, newest first.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this binary reads and writes.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        let sections = serde_json::to_string(&project.sections)
            .map_err(|err| RepoError::InvalidData(format!("unencodable sections: {err}")))?;

        self.conn.execute(
            "INSERT INTO projects (
                id,
                website_idea,
                sections,
                created_at
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                project.id.to_string(),
                project.website_idea.as_str(),
                sections,
                project.created_at.timestamp_millis(),
            ],
        )?;

        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;

        let raw = stmt.query_row([id.to_string()], read_raw_row).optional()?;
        raw.map(parse_project_row).transpose()
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(read_raw_row(row)?)?);
        }

        Ok(projects)
    }
}

struct RawProjectRow {
    id: String,
    website_idea: String,
    sections: String,
    created_at: i64,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawProjectRow> {
    Ok(RawProjectRow {
        id: row.get("id")?,
        website_idea: row.get("website_idea")?,
        sections: row.get("sections")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_project_row(raw: RawProjectRow) -> RepoResult<Project> {
    let id = Uuid::parse_str(&raw.id).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{}` in projects.id", raw.id))
    })?;

    let sections: Vec<String> = serde_json::from_str(&raw.sections).map_err(|err| {
        RepoError::InvalidData(format!("invalid sections document for project {id}: {err}"))
    })?;

    let created_at = DateTime::from_timestamp_millis(raw.created_at).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid created_at value `{}` for project {id}",
            raw.created_at
        ))
    })?;

    let project = Project {
        id,
        website_idea: raw.website_idea,
        sections,
        created_at,
    };
    project.validate()?;
    Ok(project)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'projects'
        );",
        [],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable("projects"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(projects);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(missing) = REQUIRED_PROJECT_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|column| column.as_str() == *required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: "projects",
            column: missing,
        });
    }

    Ok(())
}
