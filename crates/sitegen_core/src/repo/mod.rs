//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Project::validate()` before persistence.
//! - A missing row is `Ok(None)`, never an error; the service layer decides
//!   what absence means.

pub mod project_repo;
