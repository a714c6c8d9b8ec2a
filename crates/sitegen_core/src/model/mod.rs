//! Domain model for generated website projects.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Projects are create-then-read-only: no update or delete paths exist.

pub mod project;
