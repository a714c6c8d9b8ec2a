//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record and its JSON wire shape.
//! - Validate user input before it reaches storage.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused.
//! - `sections` equals `derive_sections(website_idea)` at creation time.
//! - `created_at` is truncated to millisecond precision so that a stored
//!   record reads back identical to the one that was written.

use crate::sections::derive_sections;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Validation failures for project input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectValidationError {
    /// The website idea is missing or blank.
    #[error("websiteIdea is required")]
    EmptyIdea,
    /// The identifier is not a well-formed project id.
    #[error("invalid project id: `{0}`")]
    InvalidId(String),
}

/// A stored website idea with its derived sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    #[serde(rename = "websiteIdea")]
    pub website_idea: String,
    pub sections: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with a generated ID, derived sections and the
    /// current time.
    pub fn new(website_idea: impl Into<String>) -> Result<Self, ProjectValidationError> {
        Self::with_id(Uuid::new_v4(), website_idea, now_millis())
    }

    /// Creates a project with caller-provided identity and timestamp.
    ///
    /// Sections are always derived; they cannot be supplied.
    pub fn with_id(
        id: ProjectId,
        website_idea: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProjectValidationError> {
        let website_idea = website_idea.into();
        let sections = derive_sections(&website_idea);
        let project = Self {
            id,
            website_idea,
            sections,
            created_at,
        };
        project.validate()?;
        Ok(project)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.website_idea.trim().is_empty() {
            return Err(ProjectValidationError::EmptyIdea);
        }
        Ok(())
    }
}

/// Parses a client-supplied identifier.
pub fn parse_project_id(value: &str) -> Result<ProjectId, ProjectValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| ProjectValidationError::InvalidId(value.to_string()))
}

fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}
