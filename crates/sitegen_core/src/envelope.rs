//! JSON wire envelope shared by the HTTP server and client.
//!
//! Every response body is `{success, data?, error?}`; failures never escape
//! as transport-level errors.

use serde::{Deserialize, Serialize};

/// Response envelope for every `/api/projects` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success. A missing field reads as `None` without a
    /// `T: Default` bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Collapses the envelope into a `Result`.
    ///
    /// `Ok(None)` means the server reported success without a payload.
    pub fn into_result(self) -> Result<Option<T>, Option<String>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error)
        }
    }
}

/// Body of `POST /api/projects`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Missing on the wire deserializes as empty and fails validation.
    #[serde(rename = "websiteIdea", default)]
    pub website_idea: String,
}
