//! Project list controller.
//!
//! Same optimistic shape as [`crate::tasks`]: validate, apply to the
//! visible list, call the backend, commit or roll back, notice the
//! outcome. Differences worth knowing: a created project always starts
//! `Active`, and a committed delete leaves the list meta stale until the
//! next refresh (the cascade onto tasks happens backend-side).

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use taskdeck_core::project::{validate_new_project, validate_project_patch};
use taskdeck_store::models::project::{
    CreateProject, Project, ProjectStatus, UpdateProject,
};

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::error::ClientResult;
use crate::filters::{Facet, ProjectListQuery};
use crate::notice::NoticeHub;
use crate::optimistic::{next_temp_id, PendingMutation};
use crate::repository::ProjectRepository;

/// Renderable list state. `total` and `total_pages` reflect the last
/// refresh; optimistic edits touch only `projects` until the next one.
#[derive(Debug, Clone, Default)]
pub struct ProjectList {
    pub projects: Vec<Project>,
    pub total: usize,
    pub total_pages: u32,
}

/// Controller behind the projects page.
pub struct ProjectListView {
    repo: Arc<dyn ProjectRepository>,
    notices: Arc<NoticeHub>,
    data: RwLock<ProjectList>,
    query: RwLock<ProjectListQuery>,
    cancel: CancellationToken,
}

impl ProjectListView {
    pub fn new(repo: Arc<dyn ProjectRepository>, notices: Arc<NoticeHub>) -> Self {
        Self::with_query(repo, notices, ProjectListQuery::default())
    }

    /// Start from URL state instead of defaults.
    pub fn with_query(
        repo: Arc<dyn ProjectRepository>,
        notices: Arc<NoticeHub>,
        query: ProjectListQuery,
    ) -> Self {
        Self {
            repo,
            notices,
            data: RwLock::new(ProjectList::default()),
            query: RwLock::new(query),
            cancel: CancellationToken::new(),
        }
    }

    pub async fn snapshot(&self) -> ProjectList {
        self.data.read().await.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.data.read().await.projects.clone()
    }

    pub async fn query(&self) -> ProjectListQuery {
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

    /// Fetch the page described by the current query into the list.
    pub async fn refresh(&self) -> ClientResult<()> {
        let (filter, pagination) = {
            let query = self.query.read().await;
            (query.filter(), query.pagination())
        };

        let result = self.repo.list(&filter, pagination).await;
        if self.cancel.is_cancelled() {
            return result.map(|_| ());
        }

        match result {
            Ok(page) => {
                let mut data = self.data.write().await;
                data.projects = page.items;
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

    /// Create a project optimistically. Invalid input fails fast with
    /// `Validation` and never flashes into the list.
    pub async fn create_project(&self, input: CreateProject) -> ClientResult<Project> {
        validate_new_project(&input.name, input.description.as_deref())?;

        let now = Utc::now();
        let temp_id = next_temp_id();
        let optimistic = Project {
            id: temp_id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let pending = PendingMutation::Create { temp_id };
        self.data.write().await.projects.push(optimistic);

        let result = self.repo.create(&input).await;
        if self.cancel.is_cancelled() {
            return result;
        }

        match result {
            Ok(created) => {
                pending.commit(&mut self.data.write().await.projects, Some(created.clone()));
                self.notices.success("Project created successfully!").await;
                Ok(created)
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.projects);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Merge a patch into a project optimistically. `Ok(None)` without a
    /// backend call when the id is not in the visible list.
    pub async fn update_project(
        &self,
        id: &str,
        changes: UpdateProject,
    ) -> ClientResult<Option<Project>> {
        validate_project_patch(changes.name.as_deref(), changes.description.as_deref())?;

        let pending = {
            let mut data = self.data.write().await;
            let Some(slot) = data.projects.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            let prior = slot.clone();
            if let Some(name) = changes.name.as_deref() {
                slot.name = name.to_string();
            }
            if let Some(description) = changes.description.as_deref() {
                slot.description = Some(description.to_string());
            }
            if let Some(status) = changes.status {
                slot.status = status;
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
                pending.commit(&mut self.data.write().await.projects, Some(updated.clone()));
                self.notices.success("Project updated successfully!").await;
                Ok(Some(updated))
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.projects);
                self.notices.error(e.to_string()).await;
                Err(e)
            }
        }
    }

    /// Remove a project optimistically. An id absent from the list is
    /// already gone: `Ok(false)`, no backend call. A failed delete
    /// reappends the record at the end of the list.
    pub async fn delete_project(&self, id: &str) -> ClientResult<bool> {
        let pending = {
            let mut data = self.data.write().await;
            let Some(index) = data.projects.iter().position(|p| p.id == id) else {
                return Ok(false);
            };
            let prior = data.projects.remove(index);
            PendingMutation::Delete { prior }
        };

        let result = self.repo.delete(id).await;
        if self.cancel.is_cancelled() {
            return result.map(|_| true);
        }

        match result {
            Ok(()) => {
                self.notices.success("Project deleted successfully!").await;
                Ok(true)
            }
            Err(e) => {
                pending.rollback(&mut self.data.write().await.projects);
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

    /// Narrow to one status (or all) and refetch. Resets the page.
    pub async fn set_status_filter(&self, status: Facet<ProjectStatus>) -> ClientResult<()> {
        {
            let mut query = self.query.write().await;
            *query = query.clone().with_status(status);
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
        *self.query.write().await = ProjectListQuery::cleared();
        self.refresh().await
    }

    /// Wire a debounced search input to this view; see
    /// [`TaskBoardView::debounced_search`](crate::tasks::TaskBoardView::debounced_search).
    pub fn debounced_search(self: &Arc<Self>) -> Debouncer<String> {
        let (debouncer, mut settled) = Debouncer::new(DEFAULT_DEBOUNCE);
        let view = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = view.cancel.cancelled() => break,
                    text = settled.recv() => match text {
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

#[cfg(test)]
mod tests {
    use taskdeck_store::MemoryStore;

    use crate::memory::MemoryProjects;

    use super::*;

    async fn seeded_view() -> ProjectListView {
        let store = Arc::new(MemoryStore::seeded().await);
        ProjectListView::new(
            Arc::new(MemoryProjects::new(store)),
            Arc::new(NoticeHub::with_ttl(std::time::Duration::ZERO)),
        )
    }

    #[tokio::test]
    async fn refresh_fills_the_first_page() {
        let view = seeded_view().await;
        view.refresh().await.unwrap();

        let list = view.snapshot().await;
        assert_eq!(list.projects.len(), 10);
        assert_eq!(list.total, 12);
        assert_eq!(list.total_pages, 2);
        assert_eq!(list.projects[0].name, "Website Redesign");
    }

    #[tokio::test]
    async fn filter_transitions_reset_the_page() {
        let view = seeded_view().await;
        view.set_page(2).await.unwrap();
        assert_eq!(view.query().await.page, 2);

        view.set_status_filter(Facet::Only(ProjectStatus::Completed))
            .await
            .unwrap();
        let query = view.query().await;
        assert_eq!(query.page, 1);
        assert_eq!(view.url_query().await, "status=completed");

        let list = view.snapshot().await;
        assert_eq!(list.total, 4);
    }

    #[tokio::test]
    async fn clear_filters_returns_to_the_bare_path() {
        let view = seeded_view().await;
        view.apply_search("migration").await.unwrap();
        assert_eq!(view.snapshot().await.total, 2);

        view.clear_filters().await.unwrap();
        assert_eq!(view.url_query().await, "");
        assert_eq!(view.snapshot().await.total, 12);
    }
}
