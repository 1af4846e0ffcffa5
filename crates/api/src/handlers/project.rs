//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use taskdeck_core::error::CoreError;
use taskdeck_core::project::{validate_new_project, validate_project_patch};
use taskdeck_store::models::project::{CreateProject, Project, ProjectStatus, UpdateProject};
use taskdeck_store::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::query::ProjectListParams;
use crate::response::{DeleteResponse, ProjectListResponse};
use crate::state::AppState;

/// Create payload with raw fields. Deserializing into loose options lets
/// missing or malformed values surface as 400 validation errors instead of
/// body rejections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Partial update payload; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let filter = params.filter()?;
    let page = ProjectRepo::list(&state.store, &filter, params.pagination()).await;
    Ok(Json(page.into()))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectPayload>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let name = payload.name.unwrap_or_default();
    validate_new_project(&name, payload.description.as_deref())?;

    let input = CreateProject {
        name,
        description: payload.description,
    };
    let project = ProjectRepo::create(&state.store, &input).await;
    tracing::info!(project_id = %project.id, "created project");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.store, &id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PATCH /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectPayload>,
) -> AppResult<Json<Project>> {
    validate_project_patch(payload.name.as_deref(), payload.description.as_deref())?;
    let status = match payload.status.as_deref() {
        Some(raw) => Some(raw.parse::<ProjectStatus>()?),
        None => None,
    };

    let changes = UpdateProject {
        name: payload.name,
        description: payload.description,
        status,
    };
    let project = ProjectRepo::update(&state.store, &id, &changes)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(project_id = %project.id, "updated project");
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = ProjectRepo::delete(&state.store, &id).await;
    if deleted {
        tracing::info!(project_id = %id, "deleted project");
        Ok(Json(DeleteResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}
