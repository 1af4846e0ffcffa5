//! Remote backend: the repository ports served over HTTP by a taskdeck API
//! server.
//!
//! [`ApiClient`] owns the connection pool and the error classification; the
//! two facade structs translate port calls into routes. Status mapping:
//! a 400 becomes [`ClientError::Validation`] with the server's message, a
//! 404 becomes [`ClientError::NotFound`] for the record the caller named,
//! and any other non-success status surfaces as [`ClientError::Api`].
//! Transport failures (refused connection, timeout) never reach the status
//! mapping and come back as [`ClientError::Network`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use url::Url;

use taskdeck_core::page::{Page, Pagination};
use taskdeck_store::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use taskdeck_store::models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};

use crate::error::{ClientError, ClientResult};
use crate::repository::{ProjectRepository, TaskRepository};

/// Per-request timeout. Counts from connect to the last body byte.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/* --- wire shapes --------------------------------------------------------- */

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectListPayload {
    projects: Vec<Project>,
    total: usize,
    page: u32,
    page_size: u32,
    total_pages: u32,
}

impl From<ProjectListPayload> for Page<Project> {
    fn from(payload: ProjectListPayload) -> Self {
        Page {
            items: payload.projects,
            total: payload.total,
            page: payload.page,
            page_size: payload.page_size,
            total_pages: payload.total_pages,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskListPayload {
    tasks: Vec<Task>,
    total: usize,
    page: u32,
    page_size: u32,
    total_pages: u32,
}

impl From<TaskListPayload> for Page<Task> {
    fn from(payload: TaskListPayload) -> Self {
        Page {
            items: payload.tasks,
            total: payload.total,
            page: payload.page,
            page_size: payload.page_size,
            total_pages: payload.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusBody {
    status: TaskStatus,
}

/* --- HTTP client --------------------------------------------------------- */

/// Thin wrapper around a [`reqwest::Client`] pinned to one API base URL,
/// for example `http://localhost:3000/api`.
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    pub fn new(base_url: Url) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.patch(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.client.delete(self.url(path)).send().await?;
        // The `{"success": true}` acknowledgement carries no information
        // beyond the status code.
        handle_response::<serde_json::Value>(response).await.map(|_| ())
    }
}

/// Classify a response by status, extracting the server's error message
/// from the `{"error", "code"}` body where one exists.
async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Unknown(format!("Unexpected response body: {e}")));
    }

    let code = status.as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {code}"),
    };
    tracing::debug!(status = code, %message, "API request failed");

    match code {
        400 => Err(ClientError::Validation(message)),
        _ => Err(ClientError::Api { status: code, message }),
    }
}

/// Rewrite a bare 404 into `NotFound` for the record the caller addressed.
/// Only the call site knows which entity the route named.
fn specialize_not_found(err: ClientError, entity: &'static str, id: &str) -> ClientError {
    match err {
        ClientError::Api { status: 404, .. } => ClientError::not_found(entity, id),
        other => other,
    }
}

/* --- query strings ------------------------------------------------------- */

fn project_list_query(filter: &ProjectFilter, pagination: Pagination) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(search) = filter.search.as_deref() {
        if !search.is_empty() {
            query.append_pair("search", search);
        }
    }
    if let Some(status) = filter.status {
        query.append_pair("status", status.as_str());
    }
    query.append_pair("page", &pagination.page.to_string());
    query.append_pair("pageSize", &pagination.page_size.to_string());
    query.finish()
}

fn task_list_query(filter: &TaskFilter, pagination: Pagination) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(search) = filter.search.as_deref() {
        if !search.is_empty() {
            query.append_pair("search", search);
        }
    }
    if let Some(status) = filter.status {
        query.append_pair("status", status.as_str());
    }
    if let Some(priority) = filter.priority {
        query.append_pair("priority", priority.as_str());
    }
    query.append_pair("page", &pagination.page.to_string());
    query.append_pair("pageSize", &pagination.page_size.to_string());
    query.finish()
}

/* --- projects ------------------------------------------------------------ */

/// [`ProjectRepository`] speaking to `/projects` routes.
pub struct HttpProjects {
    api: Arc<ApiClient>,
}

impl HttpProjects {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProjectRepository for HttpProjects {
    async fn list(
        &self,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Project>> {
        let query = project_list_query(filter, pagination);
        let payload: ProjectListPayload = self.api.get(&format!("/projects?{query}")).await?;
        Ok(payload.into())
    }

    async fn get(&self, id: &str) -> ClientResult<Project> {
        self.api
            .get(&format!("/projects/{id}"))
            .await
            .map_err(|e| specialize_not_found(e, "Project", id))
    }

    async fn create(&self, input: &CreateProject) -> ClientResult<Project> {
        self.api.post("/projects", input).await
    }

    async fn update(&self, id: &str, changes: &UpdateProject) -> ClientResult<Project> {
        self.api
            .patch(&format!("/projects/{id}"), changes)
            .await
            .map_err(|e| specialize_not_found(e, "Project", id))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.api
            .delete(&format!("/projects/{id}"))
            .await
            .map_err(|e| specialize_not_found(e, "Project", id))
    }
}

/* --- tasks --------------------------------------------------------------- */

/// [`TaskRepository`] speaking to `/projects/{id}/tasks` and `/tasks`
/// routes.
pub struct HttpTasks {
    api: Arc<ApiClient>,
}

impl HttpTasks {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TaskRepository for HttpTasks {
    async fn list(
        &self,
        project_id: &str,
        filter: &TaskFilter,
        pagination: Pagination,
    ) -> ClientResult<Page<Task>> {
        let query = task_list_query(filter, pagination);
        let payload: TaskListPayload = self
            .api
            .get(&format!("/projects/{project_id}/tasks?{query}"))
            .await
            .map_err(|e| specialize_not_found(e, "Project", project_id))?;
        Ok(payload.into())
    }

    async fn get(&self, id: &str) -> ClientResult<Task> {
        self.api
            .get(&format!("/tasks/{id}"))
            .await
            .map_err(|e| specialize_not_found(e, "Task", id))
    }

    async fn create(&self, input: &CreateTask) -> ClientResult<Task> {
        // The project-scoped route fills defaults for absent fields; the
        // flat `/tasks` route would insist on every field being present.
        self.api
            .post(&format!("/projects/{}/tasks", input.project_id), input)
            .await
            .map_err(|e| specialize_not_found(e, "Project", &input.project_id))
    }

    async fn update(&self, id: &str, changes: &UpdateTask) -> ClientResult<Task> {
        self.api
            .patch(&format!("/tasks/{id}"), changes)
            .await
            .map_err(|e| specialize_not_found(e, "Task", id))
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> ClientResult<Task> {
        self.api
            .patch(&format!("/tasks/{id}/status"), &StatusBody { status })
            .await
            .map_err(|e| specialize_not_found(e, "Task", id))
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.api
            .delete(&format!("/tasks/{id}"))
            .await
            .map_err(|e| specialize_not_found(e, "Task", id))
    }
}
