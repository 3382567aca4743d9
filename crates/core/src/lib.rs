//! Domain layer of the hooklog webhook receiver.
//!
//! - [`normalizer`] maps GitHub webhook payloads to [`events::NewRepoEvent`]
//!   records.
//! - [`store`] defines the [`store::EventStore`] port and an in-memory
//!   implementation.
//!
//! This crate performs no network or database I/O.

pub mod error;
pub mod events;
pub mod normalizer;
pub mod store;
pub mod types;
