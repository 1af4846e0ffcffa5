//! In-memory backend: the repository ports served by a local
//! [`MemoryStore`].
//!
//! Both facades hold the same `Arc<MemoryStore>`, so a project delete is
//! observed by the task facade immediately. The store's configured latency
//! stands in for the network round-trip the remote backend would pay.

use std::sync::Arc;

use async_trait::async_trait;

use taskdeck_core::page::{Page, Pagination};
use taskdeck_store::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use taskdeck_store::models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};
use taskdeck_store::repositories::{ProjectRepo, TaskRepo};
use taskdeck_store::MemoryStore;

use crate::error::{ClientError, ClientResult};
use crate::repository::{ProjectRepository, TaskRepository};

/* --- projects ------------------------------------------------------------ */

/// [`ProjectRepository`] backed by a shared in-memory store.
pub struct MemoryProjects {
    store: Arc<MemoryStore>,
}

impl MemoryProjects {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjects {
    async fn list(
        &self,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Project>> {
        Ok(ProjectRepo::list(&self.store, filter, pagination).await)
    }

    async fn get(&self, id: &str) -> ClientResult<Project> {
        ProjectRepo::find_by_id(&self.store, id)
            .await
            .ok_or_else(|| ClientError::not_found("Project", id))
    }

    async fn create(&self, input: &CreateProject) -> ClientResult<Project> {
        Ok(ProjectRepo::create(&self.store, input).await)
    }

    async fn update(&self, id: &str, changes: &UpdateProject) -> ClientResult<Project> {
        ProjectRepo::update(&self.store, id, changes)
            .await
            .ok_or_else(|| ClientError::not_found("Project", id))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        if ProjectRepo::delete(&self.store, id).await {
            Ok(())
        } else {
            Err(ClientError::not_found("Project", id))
        }
    }
}

/* --- tasks --------------------------------------------------------------- */

/// [`TaskRepository`] backed by the same shared store.
pub struct MemoryTasks {
    store: Arc<MemoryStore>,
}

impl MemoryTasks {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRepository for MemoryTasks {
    async fn list(
        &self,
        project_id: &str,
        filter: &TaskFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Task>> {
        TaskRepo::list_for_project(&self.store, project_id, filter, pagination)
            .await
            .ok_or_else(|| ClientError::not_found("Project", project_id))
    }

    async fn get(&self, id: &str) -> ClientResult<Task> {
        TaskRepo::find_by_id(&self.store, id)
            .await
            .ok_or_else(|| ClientError::not_found("Task", id))
    }

    async fn create(&self, input: &CreateTask) -> ClientResult<Task> {
        TaskRepo::create(&self.store, input)
            .await
            .ok_or_else(|| ClientError::not_found("Project", input.project_id.clone()))
    }

    async fn update(&self, id: &str, changes: &UpdateTask) -> ClientResult<Task> {
        TaskRepo::update(&self.store, id, changes)
            .await
            .ok_or_else(|| ClientError::not_found("Task", id))
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> ClientResult<Task> {
        TaskRepo::update_status(&self.store, id, status)
            .await
            .ok_or_else(|| ClientError::not_found("Task", id))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        if TaskRepo::delete(&self.store, id).await {
            Ok(())
        } else {
            Err(ClientError::not_found("Task", id))
        }
    }
}
