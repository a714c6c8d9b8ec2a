//! Client side of the website section generator.
//!
//! # Responsibility
//! - Talk to the `/api/projects` HTTP API (`api`).
//! - Keep the form responsive: debounce input, render an optimistic guess
//!   from the shared rule table, then replace it with the server result
//!   (`session`).
//! - Remember recent server results per normalized idea (`cache`).

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod session;

pub use api::{HttpProjectsApi, ProjectsApi};
pub use cache::SectionCache;
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::ClientError;
pub use session::{GeneratorSession, LookupOutcome, ViewState, EMPTY_IDEA_MESSAGE};
