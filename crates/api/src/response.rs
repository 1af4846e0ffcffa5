//! Shared response types for API handlers.
//!
//! List endpoints return the resource array under a per-resource key
//! (`projects`, `tasks`) with page metadata alongside it, matching the wire
//! shape clients already consume. Use these structs instead of ad-hoc
//! `serde_json::json!` maps to get compile-time type safety.

use serde::Serialize;

use taskdeck_core::page::Page;
use taskdeck_store::models::project::Project;
use taskdeck_store::models::task::Task;

/// Payload of `GET /api/projects`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<Page<Project>> for ProjectListResponse {
    fn from(page: Page<Project>) -> Self {
        Self {
            projects: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Payload of `GET /api/projects/{project_id}/tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<Page<Task>> for TaskListResponse {
    fn from(page: Page<Task>) -> Self {
        Self {
            tasks: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// Payload of a successful `DELETE`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
