//! Domain rules shared by every taskdeck crate.
//!
//! Carries the error taxonomy, shared type aliases, per-entity validation
//! rules, and the pagination mathematics. No I/O and no entity models --
//! models live in `taskdeck-store`, transport concerns in `taskdeck-api`
//! and `taskdeck-client`.

pub mod error;
pub mod page;
pub mod project;
pub mod task;
pub mod types;

pub use error::CoreError;
