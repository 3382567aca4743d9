//! Row structs for database tables.

pub mod repo_event;
