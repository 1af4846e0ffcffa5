//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&MemoryStore` as the first argument. Not-found is signaled with
//! `Option`/`bool` rather than an error; callers decide what missing means
//! at their own boundary.

pub mod project_repo;
pub mod task_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
