//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod repo_event_repo;

pub use repo_event_repo::RepoEventRepo;
