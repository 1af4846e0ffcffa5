//! Backend-neutral resource ports.
//!
//! View controllers depend on these traits, never on a concrete backend.
//! The in-memory implementation lives in [`crate::memory`], the HTTP one in
//! [`crate::remote`]; which pair a program gets is decided once, at
//! composition time, in [`crate::config`].
//!
//! Contract notes shared by both implementations:
//! - `get`, `update`, and `delete` on a missing record return
//!   [`ClientError::NotFound`](crate::ClientError::NotFound).
//! - Inputs are NOT re-validated here; callers run the schema rules from
//!   `taskdeck-core` before calling in.
//! - Listings come back in insertion order, already paginated.

use async_trait::async_trait;

use taskdeck_core::page::{Page, Pagination};
use taskdeck_store::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use taskdeck_store::models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};

use crate::error::ClientResult;

/// CRUD port for the projects resource.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(
        &self,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Project>>;

    async fn get(&self, id: &str) -> ClientResult<Project>;

    async fn create(&self, input: &CreateProject) -> ClientResult<Project>;

    async fn update(&self, id: &str, changes: &UpdateProject) -> ClientResult<Project>;

    /// Deletes the project and, by cascade, every task under it.
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// CRUD port for the tasks resource. Tasks are listed per owning project
/// but addressed individually by task id.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists the tasks of one project. Fails with `NotFound` when the
    /// project itself does not exist, even if the filter matches nothing.
    async fn list(
        &self,
        project_id: &str,
        filter: &TaskFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Task>>;

    async fn get(&self, id: &str) -> ClientResult<Task>;

    /// Fails with `NotFound` naming the project when `input.project_id`
    /// does not reference a live project.
    async fn create(&self, input: &CreateTask) -> ClientResult<Task>;

    async fn update(&self, id: &str, changes: &UpdateTask) -> ClientResult<Task>;

    /// Moves the task to another board column, touching nothing else.
    async fn update_status(&self, id: &str, status: TaskStatus) -> ClientResult<Task>;

    async fn delete(&self, id: &str) -> ClientResult<()>;
}
