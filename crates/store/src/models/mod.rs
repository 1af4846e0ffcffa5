//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct in the camelCase wire shape
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A filter struct with a `matches` predicate used by list queries

pub mod project;
pub mod task;
