//! Repository for the tasks collection.

use chrono::Utc;

use taskdeck_core::page::{Page, Pagination};

use crate::models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};
use crate::store::MemoryStore;

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created record.
    ///
    /// Returns `None` when `input.project_id` does not reference a live
    /// project; a task may only be created under an existing project. Both
    /// collections stay locked across the check and the insert so a
    /// concurrent project delete cannot slip between them.
    pub async fn create(store: &MemoryStore, input: &CreateTask) -> Option<Task> {
        store.simulate_latency().await;
        // Lock order: projects before tasks.
        let projects = store.projects.read().await;
        let mut tasks = store.tasks.write().await;
        if !projects.iter().any(|p| p.id == input.project_id) {
            return None;
        }

        let now = Utc::now();
        let record = Task {
            id: store.allocate_id(),
            project_id: input.project_id.clone(),
            title: input.title.trim().to_string(),
            description: input
                .description
                .as_deref()
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tasks.push(record.clone());
        Some(record)
    }

    /// Find a task by id.
    pub async fn find_by_id(store: &MemoryStore, id: &str) -> Option<Task> {
        store.simulate_latency().await;
        let tasks = store.tasks.read().await;
        tasks.iter().find(|t| t.id == id).cloned()
    }

    /// List the tasks of one project matching `filter`, paginated.
    ///
    /// Returns `None` when the project itself does not exist, so callers
    /// can distinguish "no project" from "project with no matching tasks".
    pub async fn list_for_project(
        store: &MemoryStore,
        project_id: &str,
        filter: &TaskFilter,
        pagination: Pagination,
    ) -> Option<Page<Task>> {
        store.simulate_latency().await;
        // Lock order: projects before tasks.
        let projects = store.projects.read().await;
        let tasks = store.tasks.read().await;
        if !projects.iter().any(|p| p.id == project_id) {
            return None;
        }

        let filtered: Vec<Task> = tasks
            .iter()
            .filter(|t| t.project_id == project_id && filter.matches(t))
            .cloned()
            .collect();
        Some(Page::from_filtered(filtered, pagination))
    }

    /// Update a task. Only non-`None` fields in `input` are applied;
    /// `updated_at` is bumped on success.
    ///
    /// Returns `None` if no record with the given `id` exists.
    pub async fn update(store: &MemoryStore, id: &str, input: &UpdateTask) -> Option<Task> {
        store.simulate_latency().await;
        let mut tasks = store.tasks.write().await;
        let record = tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = input.title.as_deref() {
            record.title = title.trim().to_string();
        }
        if let Some(description) = input.description.as_deref() {
            record.description = description.trim().to_string();
        }
        if let Some(status) = input.status {
            record.status = status;
        }
        if let Some(priority) = input.priority {
            record.priority = priority;
        }
        record.updated_at = Utc::now();
        Some(record.clone())
    }

    /// Move a task to another board column, touching nothing else.
    ///
    /// Returns `None` if no record with the given `id` exists.
    pub async fn update_status(
        store: &MemoryStore,
        id: &str,
        status: TaskStatus,
    ) -> Option<Task> {
        store.simulate_latency().await;
        let mut tasks = store.tasks.write().await;
        let record = tasks.iter_mut().find(|t| t.id == id)?;
        record.status = status;
        record.updated_at = Utc::now();
        Some(record.clone())
    }

    /// Delete a task by id. Returns `true` if a record was removed.
    pub async fn delete(store: &MemoryStore, id: &str) -> bool {
        store.simulate_latency().await;
        let mut tasks = store.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() != before
    }
}
