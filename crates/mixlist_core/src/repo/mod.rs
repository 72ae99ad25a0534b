//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-kind CRUD contracts over the record tables.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Repositories only run against a fully migrated connection.
//! - Update/delete on a missing id return `RepoError::NotFound` and change
//!   nothing; callers decide whether that is worth surfacing.

pub mod record_repo;
pub mod tables;
