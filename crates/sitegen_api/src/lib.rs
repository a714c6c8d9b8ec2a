//! HTTP surface for the website section generator.
//!
//! # Responsibility
//! - Route `/api/projects` requests onto an injected `ProjectStore`.
//! - Wrap every outcome in the `{success, data?, error?}` envelope.
//! - Apply the CORS policy for the local web front-end.

pub mod config;
pub mod routes;
pub mod server;

pub use config::{ServerConfig, ENV_FILE};
pub use routes::{router, AppState};
pub use server::{build_app, run, ServerError};
