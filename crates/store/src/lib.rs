//! In-memory data store for taskdeck.
//!
//! Holds every collection as an insertion-ordered `Vec` behind its own
//! async lock, simulates a configurable network latency before each
//! operation, and exposes CRUD through repository structs. There is no
//! persistence: a restart of the owning process resets the data to the
//! seed set.

pub mod models;
pub mod repositories;
mod seed;
mod store;

pub use store::MemoryStore;
