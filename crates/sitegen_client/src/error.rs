//! Client error taxonomy.

use thiserror::Error;

pub const CREATE_FAILED_MESSAGE: &str = "Failed to create project";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch project";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with `success: false`.
    #[error("{0}")]
    Api(String),
    /// A newer request superseded this one. Never shown to the user.
    #[error("request superseded")]
    Aborted,
}

impl ClientError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
