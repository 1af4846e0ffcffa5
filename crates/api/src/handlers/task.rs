//! Handlers for the `/tasks` resource and the project-scoped task list.
//!
//! Task payloads are schema-checked field by field so a 400 carries every
//! violated field at once, not just the first.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use taskdeck_core::error::CoreError;
use taskdeck_core::task::{validate_description, validate_project_ref, validate_title};
use taskdeck_store::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use taskdeck_store::repositories::TaskRepo;

use crate::error::{AppError, AppResult, FieldError};
use crate::query::TaskListParams;
use crate::response::{DeleteResponse, TaskListResponse};
use crate::state::AppState;

/* --- payloads ------------------------------------------------------------ */

/// Body of `POST /api/tasks`. Every field is required by the schema; raw
/// strings for status/priority so a bad value is reported as a field error
/// instead of a body rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Body of `POST /api/projects/{project_id}/tasks`. Only `title` is
/// required; the rest take documented defaults.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Body of `PATCH /api/tasks/{id}`. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Body of `PATCH /api/tasks/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusBody {
    pub status: TaskStatus,
}

/* --- payload validation -------------------------------------------------- */

fn parse_field<T>(
    field: &'static str,
    raw: Option<&str>,
    details: &mut Vec<FieldError>,
) -> Option<T>
where
    T: FromStr<Err = CoreError>,
{
    match raw {
        None => None,
        Some(value) => match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                details.push(FieldError::new(field, e.to_string()));
                None
            }
        },
    }
}

fn validate_create(payload: CreateTaskPayload) -> Result<CreateTask, AppError> {
    let mut details = Vec::new();

    let project_id = payload.project_id.unwrap_or_default();
    if let Err(e) = validate_project_ref(&project_id) {
        details.push(FieldError::new("projectId", e.to_string()));
    }

    let title = payload.title.unwrap_or_default();
    if let Err(e) = validate_title(&title) {
        details.push(FieldError::new("title", e.to_string()));
    }

    match payload.description.as_deref() {
        Some(description) => {
            if let Err(e) = validate_description(description) {
                details.push(FieldError::new("description", e.to_string()));
            }
        }
        None => details.push(FieldError::new("description", "Description is required")),
    }

    if payload.status.is_none() {
        details.push(FieldError::new("status", "Status is required"));
    }
    let status = parse_field("status", payload.status.as_deref(), &mut details);

    if payload.priority.is_none() {
        details.push(FieldError::new("priority", "Priority is required"));
    }
    let priority = parse_field("priority", payload.priority.as_deref(), &mut details);

    if !details.is_empty() {
        return Err(AppError::validation(details));
    }

    Ok(CreateTask {
        project_id,
        title,
        description: payload.description,
        status,
        priority,
    })
}

fn validate_create_for_project(
    project_id: String,
    body: CreateTaskBody,
) -> Result<CreateTask, AppError> {
    let mut details = Vec::new();

    let title = body.title.unwrap_or_default();
    if let Err(e) = validate_title(&title) {
        details.push(FieldError::new("title", e.to_string()));
    }

    if let Some(description) = body.description.as_deref() {
        if let Err(e) = validate_description(description) {
            details.push(FieldError::new("description", e.to_string()));
        }
    }

    let status = parse_field("status", body.status.as_deref(), &mut details);
    let priority = parse_field("priority", body.priority.as_deref(), &mut details);

    if !details.is_empty() {
        return Err(AppError::validation(details));
    }

    Ok(CreateTask {
        project_id,
        title,
        description: body.description,
        status,
        priority,
    })
}

fn validate_update(payload: UpdateTaskPayload) -> Result<UpdateTask, AppError> {
    let mut details = Vec::new();

    if let Some(title) = payload.title.as_deref() {
        if let Err(e) = validate_title(title) {
            details.push(FieldError::new("title", e.to_string()));
        }
    }
    if let Some(description) = payload.description.as_deref() {
        if let Err(e) = validate_description(description) {
            details.push(FieldError::new("description", e.to_string()));
        }
    }
    let status = parse_field("status", payload.status.as_deref(), &mut details);
    let priority = parse_field("priority", payload.priority.as_deref(), &mut details);

    if !details.is_empty() {
        return Err(AppError::validation(details));
    }

    Ok(UpdateTask {
        title: payload.title,
        description: payload.description,
        status,
        priority,
    })
}

/* --- handlers ------------------------------------------------------------ */

/// GET /api/projects/{project_id}/tasks
pub async fn list_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<TaskListResponse>> {
    let filter = params.filter()?;
    let page = TaskRepo::list_for_project(&state.store, &project_id, &filter, params.pagination())
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(Json(page.into()))
}

/// POST /api/projects/{project_id}/tasks
pub async fn create_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(body): Json<CreateTaskBody>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let input = validate_create_for_project(project_id, body)?;
    create_validated(&state, input).await
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let input = validate_create(payload)?;
    create_validated(&state, input).await
}

async fn create_validated(
    state: &AppState,
    input: CreateTask,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = TaskRepo::create(&state.store, &input)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;
    tracing::info!(task_id = %task.id, project_id = %task.project_id, "created task");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.store, &id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PATCH /api/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaskPayload>,
) -> AppResult<Json<Task>> {
    let input = validate_update(payload)?;
    let task = TaskRepo::update(&state.store, &id, &input)
        .await
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    tracing::info!(task_id = %task.id, "updated task");
    Ok(Json(task))
}

/// PATCH /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTaskStatusBody>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::update_status(&state.store, &id, body.status)
        .await
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    tracing::info!(task_id = %task.id, status = %task.status, "updated task status");
    Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = TaskRepo::delete(&state.store, &id).await;
    if deleted {
        tracing::info!(task_id = %id, "deleted task");
        Ok(Json(DeleteResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Task", id }))
    }
}
