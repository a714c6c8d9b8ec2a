//! HTTP API client.
//!
//! # Responsibility
//! - Define the `ProjectsApi` seam the session depends on.
//! - Implement it over reqwest against `/api/projects`.
//!
//! # Invariants
//! - A `success: false` envelope becomes `ClientError::Api` carrying the
//!   server's message, or a fixed fallback when the server sent none.

use crate::error::{ClientError, CREATE_FAILED_MESSAGE, FETCH_FAILED_MESSAGE};
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use sitegen_core::{ApiResponse, CreateProjectRequest, Project};

/// Remote operations over projects.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    async fn create_project(&self, website_idea: &str) -> Result<Project, ClientError>;
    async fn get_project(&self, id: &str) -> Result<Project, ClientError>;
    async fn list_projects(&self) -> Result<Vec<Project>, ClientError>;
}

/// `ProjectsApi` over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpProjectsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProjectsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/api/projects{suffix}", self.base_url)
    }
}

#[async_trait]
impl ProjectsApi for HttpProjectsApi {
    async fn create_project(&self, website_idea: &str) -> Result<Project, ClientError> {
        let request = CreateProjectRequest {
            website_idea: website_idea.to_string(),
        };
        let response = self
            .client
            .post(self.endpoint(""))
            .json(&request)
            .send()
            .await?;
        let project: Project =
            unwrap_envelope(read_envelope(response).await?, CREATE_FAILED_MESSAGE)?;
        debug!("event=api_create module=client status=ok project_id={}", project.id);
        Ok(project)
    }

    async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&format!("/{id}")))
            .send()
            .await?;
        unwrap_envelope(read_envelope(response).await?, FETCH_FAILED_MESSAGE)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.client.get(self.endpoint("")).send().await?;
        unwrap_envelope(read_envelope(response).await?, FETCH_FAILED_MESSAGE)
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, ClientError> {
    Ok(response.json::<ApiResponse<T>>().await?)
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>, fallback: &str) -> Result<T, ClientError> {
    match envelope.into_result() {
        Ok(Some(data)) => Ok(data),
        Ok(None) | Err(None) => Err(ClientError::Api(fallback.to_string())),
        Err(Some(message)) => Err(ClientError::Api(message)),
    }
}
