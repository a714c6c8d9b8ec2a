//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate storage errors into the public error taxonomy.

pub mod project_service;
