//! Task board controller for one project.
//!
//! Holds the visible task list plus its URL-backed query state, and runs
//! every mutation optimistically: validate, apply to the list, call the
//! backend, then commit the confirmed record or roll the list back. Each
//! outcome lands on the shared [`NoticeHub`].
//!
//! Lifecycle: the view owns a [`CancellationToken`]. After [`close`]
//! (teardown), calls already in flight still resolve to their caller, but
//! they no longer touch the list or publish notices, and the debounced
//! search pump stops.
//!
//! [`close`]: TaskBoardView::close

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use taskdeck_core::task::{validate_new_task, validate_task_patch};
use taskdeck_core::types::EntityId;
use taskdeck_store::models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::error::ClientResult;
use crate::filters::{Facet, TaskListQuery};
use crate::notice::NoticeHub;
use crate::optimistic::{next_temp_id, PendingMutation};
use crate::repository::TaskRepository;

/// Renderable board state. `total` and `total_pages` reflect the last
/// refresh; optimistic edits touch only `tasks` until the next one.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub total: usize,
    pub total_pages: u32,
}

/// Controller behind a project's task board.
pub struct TaskBoardView {
    project_id: EntityId,
    repo: Arc<dyn TaskRepository>,
    notices: Arc<NoticeHub>,
    data: RwLock<TaskBoard>,
    query: RwLock<TaskListQuery>,
    cancel: CancellationToken,
}

impl TaskBoardView {
    pub fn new(
        project_id: impl Into<EntityId>,
        repo: Arc<dyn TaskRepository>,
        notices: Arc<NoticeHub>,
    ) -> Self {
        Self::with_query(project_id, repo, notices, TaskListQuery::default())
    }

    /// Start from URL state instead of defaults.
    pub fn with_query(
        project_id: impl Into<EntityId>,
        repo: Arc<dyn TaskRepository>,
        notices: Arc<NoticeHub>,
        query: TaskListQuery,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            repo,
            notices,
            data: RwLock::new(TaskBoard::default()),
            query: RwLock::new(query),
            cancel: CancellationToken::new(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub async fn snapshot(&self) -> TaskBoard {
        self.data.read().await.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.data.read().await.tasks.clone()
    }

    pub async fn query(&self) -> TaskListQuery {
        self.query.read().await.clone()
    }

    /// Canonical query string for the address bar.
    pub async fn url_query(&self) -> String {
        self.query.read().await.query_string()
    }

    /// Tear the view down. In-flight calls resolve without further state
    /// updates or notices; the search pump exits.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /* --- fetching --------------------------------------------------------- */

    /// Fetch the page described by the current query into the board.
    pub async fn refresh(&self) -> ClientResult<()> {
        let (filter, pagination) = {
            let query = self.query.read().await;
            (query.filter(), query.pagination())
        };

        let result = self.repo.list(&self.project_id, &filter, pagination).await;
        if self.cancel.is_cancelled() {
            return result.map(|_| ());
        }

        match result {
            Ok(page) => {
                let mut data = self.data.write().await;
                data.tasks = page.items;
                data.total = page.total;
                data.total_pages = page.total_pages;
                Ok(())
            }
            Err(e) => {
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /* --- mutations --------------------------------------------------------- */

    /// Create a task optimistically.
    ///
    /// Invalid input fails fast with `Validation` and never flashes into
    /// the list; the caller surfaces it inline rather than as a notice.
    pub async fn create_task(&self, input: CreateTask) -> ClientResult<Task> {
        let description = input.description.clone().unwrap_or_default();
        validate_new_task(&input.project_id, &input.title, &description)?;

        let now = Utc::now();
        let temp_id = next_temp_id();
        let optimistic = Task {
            id: temp_id.clone(),
            project_id: input.project_id.clone(),
            title: input.title.clone(),
            description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        let pending = PendingMutation::Create { temp_id };
        self.data.write().await.tasks.push(optimistic);

        let result = self.repo.create(&input).await;
        if self.cancel.is_cancelled() {
            return result;
        }

        match result {
            Ok(created) => {
                pending.commit(&mut self.data.write().await.tasks, Some(created.clone()));
                self.notices.success("Task created successfully").await;
                Ok(created)
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.tasks);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Merge a patch into a task optimistically.
    ///
    /// Returns `Ok(None)` without calling the backend when the id is not
    /// on this board; there is nothing to edit.
    pub async fn update_task(&self, id: &str, changes: UpdateTask) -> ClientResult<Option<Task>> {
        validate_task_patch(changes.title.as_deref(), changes.description.as_deref())?;

        let pending = {
            let mut data = self.data.write().await;
            let Some(slot) = data.tasks.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            let prior = slot.clone();
            if let Some(title) = changes.title.as_deref() {
                slot.title = title.to_string();
            }
            if let Some(description) = changes.description.as_deref() {
                slot.description = description.to_string();
            }
            if let Some(status) = changes.status {
                slot.status = status;
            }
            if let Some(priority) = changes.priority {
                slot.priority = priority;
            }
            slot.updated_at = Utc::now();
            PendingMutation::Update { prior }
        };

        let result = self.repo.update(id, &changes).await;
        if self.cancel.is_cancelled() {
            return result.map(Some);
        }

        match result {
            Ok(updated) => {
                pending.commit(&mut self.data.write().await.tasks, Some(updated.clone()));
                self.notices.success("Task updated successfully").await;
                Ok(Some(updated))
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.tasks);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Move a task to another column optimistically. Same absent-id no-op
    /// as [`update_task`](Self::update_task).
    pub async fn set_task_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> ClientResult<Option<Task>> {
        let pending = {
            let mut data = self.data.write().await;
            let Some(slot) = data.tasks.iter_mut().find(|t| t.id == id) else {
                return Ok(None);
            };
            let prior = slot.clone();
            slot.status = status;
            slot.updated_at = Utc::now();
            PendingMutation::Update { prior }
        };

        let result = self.repo.update_status(id, status).await;
        if self.cancel.is_cancelled() {
            return result.map(Some);
        }

        match result {
            Ok(updated) => {
                pending.commit(&mut self.data.write().await.tasks, Some(updated.clone()));
                self.notices.success("Task status updated").await;
                Ok(Some(updated))
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.tasks);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Remove a task optimistically. An id absent from the board is
    /// already gone: `Ok(false)`, no backend call. A failed delete
    /// reappends the record at the end of the list.
    pub async fn delete_task(&self, id: &str) -> ClientResult<bool> {
        let pending = {
            let mut data = self.data.write().await;
            let Some(index) = data.tasks.iter().position(|t| t.id == id) else {
                return Ok(false);
            };
            let prior = data.tasks.remove(index);
            PendingMutation::Delete { prior }
        };

        let result = self.repo.delete(id).await;
        if self.cancel.is_cancelled() {
            return result.map(|_| true);
        }

        match result {
            Ok(()) => {
                self.notices.success("Task deleted successfully").await;
                Ok(true)
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.tasks);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /* --- query state -------------------------------------------------------- */

    /// Apply settled search text and refetch. Resets to the first page.
    pub async fn apply_search(&self, text: impl Into<String>) -> ClientResult<()> {
        {
            let mut query = self.query.write().await;
            *query = query.clone().with_search(text.into());
        }
        self.refresh().await
    }

    /// Narrow to one status column (or all) and refetch. Resets the page.
    pub async fn set_status_filter(&self, status: Facet<TaskStatus>) -> ClientResult<()> {
        {
            let mut query = self.query.write().await;
            *query = query.clone().with_status(status);
        }
        self.refresh().await
    }

    /// Narrow to one priority (or all) and refetch. Resets the page.
    pub async fn set_priority_filter(&self, priority: Facet<TaskPriority>) -> ClientResult<()> {
        {
            let mut query = self.query.write().await;
            *query = query.clone().with_priority(priority);
        }
        self.refresh().await
    }

    /// Jump to a page and refetch. Page moves skip the search debouncer.
    pub async fn set_page(&self, page: u32) -> ClientResult<()> {
        {
            let mut query = self.query.write().await;
            *query = query.clone().with_page(page);
        }
        self.refresh().await
    }

    /// Drop every filter and refetch the first page.
    pub async fn clear_filters(&self) -> ClientResult<()> {
        *self.query.write().await = TaskListQuery::cleared();
        self.refresh().await
    }

    /// Wire a debounced search input to this view. Raw keystrokes go into
    /// the returned handle; values that settle for [`DEFAULT_DEBOUNCE`]
    /// are applied as the search text. The pump exits when the view
    /// closes or the handle is dropped.
    pub fn debounced_search(self: &Arc<Self>) -> Debouncer<String> {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);
        let view = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = view.cancel.cancelled() => break,
                    text = settled.recv() => match text {
                        // A fetch failure is already on the notice hub;
                        // the pump keeps serving later input.
                        Some(text) => {
                            let _ = view.apply_search(text).await;
                        }
                        None => break,
                    }
                }
            }
        });
        debouncer
    }
}
