//! Repository for the projects collection.

use chrono::Utc;

use taskdeck_core::page::{Page, Pagination};

use crate::models::project::{
    CreateProject, Project, ProjectFilter, ProjectStatus, UpdateProject,
};
use crate::store::MemoryStore;

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created record.
    ///
    /// New projects start `Active`. Name and description are stored trimmed.
    pub async fn create(store: &MemoryStore, input: &CreateProject) -> Project {
        store.simulate_latency().await;
        let now = Utc::now();
        let record = Project {
            id: store.allocate_id(),
            name: input.name.trim().to_string(),
            description: input.description.as_deref().map(|d| d.trim().to_string()),
            status: ProjectStatus::Active,
            created_at: now,
            updated_at: now,
        };
        store.projects.write().await.push(record.clone());
        record
    }

    /// Find a project by id.
    pub async fn find_by_id(store: &MemoryStore, id: &str) -> Option<Project> {
        store.simulate_latency().await;
        let projects = store.projects.read().await;
        projects.iter().find(|p| p.id == id).cloned()
    }

    /// List projects matching `filter`, paginated.
    ///
    /// Records come back in insertion order. `total` counts every match,
    /// not just the returned window.
    pub async fn list(
        store: &MemoryStore,
        filter: &ProjectFilter,
        pagination: Pagination,
    ) -> Page<Project> {
        store.simulate_latency().await;
        let projects = store.projects.read().await;
        let filtered: Vec<Project> = projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        Page::from_filtered(filtered, pagination)
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `updated_at` is bumped on success.
    ///
    /// Returns `None` if no record with the given `id` exists.
    pub async fn update(
        store: &MemoryStore,
        id: &str,
        input: &UpdateProject,
    ) -> Option<Project> {
        store.simulate_latency().await;
        let mut projects = store.projects.write().await;
        let record = projects.iter_mut().find(|p| p.id == id)?;
        if let Some(name) = input.name.as_deref() {
            record.name = name.trim().to_string();
        }
        if let Some(description) = input.description.as_deref() {
            record.description = Some(description.trim().to_string());
        }
        if let Some(status) = input.status {
            record.status = status;
        }
        record.updated_at = Utc::now();
        Some(record.clone())
    }

    /// Delete a project and every task that belongs to it. Returns `true`
    /// if a record was removed.
    pub async fn delete(store: &MemoryStore, id: &str) -> bool {
        store.simulate_latency().await;
        // Lock order: projects before tasks.
        let mut projects = store.projects.write().await;
        let mut tasks = store.tasks.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return false;
        }
        let tasks_before = tasks.len();
        tasks.retain(|t| t.project_id != id);
        let cascaded = tasks_before - tasks.len();
        if cascaded > 0 {
            tracing::debug!(project_id = %id, cascaded, "deleted tasks with their project");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateProject {
        CreateProject {
            name: name.to_string(),
            description: None,
        }
    }

    // --- create / read ---

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let created = ProjectRepo::create(&store, &create_input("Launch Plan")).await;

        assert!(!created.id.is_empty());
        assert_eq!(created.status, ProjectStatus::Active);
        assert_eq!(created.updated_at, created.created_at);

        let found = ProjectRepo::find_by_id(&store, &created.id).await;
        assert_eq!(found.map(|p| p.name), Some("Launch Plan".to_string()));
    }

    #[tokio::test]
    async fn create_trims_name_and_description() {
        let store = MemoryStore::new();
        let created = ProjectRepo::create(
            &store,
            &CreateProject {
                name: "  Launch Plan  ".to_string(),
                description: Some("  staged rollout  ".to_string()),
            },
        )
        .await;

        assert_eq!(created.name, "Launch Plan");
        assert_eq!(created.description.as_deref(), Some("staged rollout"));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let store = MemoryStore::new();
        assert!(ProjectRepo::find_by_id(&store, "999").await.is_none());
    }

    // --- list: filtering and pagination stay consistent ---

    #[tokio::test]
    async fn list_total_counts_all_matches_across_pages() {
        let store = MemoryStore::seeded().await;
        let filter = ProjectFilter::default();

        let first = ProjectRepo::list(&store, &filter, Pagination::new(1, 5)).await;
        assert_eq!(first.total, 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items.len(), 5);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let window = ProjectRepo::list(&store, &filter, Pagination::new(page, 5)).await;
            assert_eq!(window.total, 12);
            seen.extend(window.items.into_iter().map(|p| p.id));
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 12);
    }

    #[tokio::test]
    async fn list_applies_filter_before_pagination() {
        let store = MemoryStore::seeded().await;
        let filter = ProjectFilter {
            search: None,
            status: Some(ProjectStatus::Completed),
        };

        let page = ProjectRepo::list(&store, &filter, Pagination::new(1, 2)).await;
        // Seed data holds four completed projects.
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(|p| p.status == ProjectStatus::Completed));
    }

    #[tokio::test]
    async fn list_page_past_the_end_is_empty() {
        let store = MemoryStore::seeded().await;
        let page =
            ProjectRepo::list(&store, &ProjectFilter::default(), Pagination::new(9, 10)).await;
        assert!(page.items.is_empty());
        assert_eq!(page.total, 12);
    }

    #[tokio::test]
    async fn list_search_narrows_by_name_or_description() {
        let store = MemoryStore::seeded().await;
        let filter = ProjectFilter {
            search: Some("migration".to_string()),
            status: None,
        };
        let page = ProjectRepo::list(&store, &filter, Pagination::default()).await;
        // "Database Migration" by name, "API Integration" by description.
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["first", "second", "third"] {
            ProjectRepo::create(&store, &create_input(name)).await;
        }
        let page =
            ProjectRepo::list(&store, &ProjectFilter::default(), Pagination::default()).await;
        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    // --- update / delete ---

    #[tokio::test]
    async fn update_merges_partial_fields_and_bumps_updated_at() {
        let store = MemoryStore::new();
        let created = ProjectRepo::create(
            &store,
            &CreateProject {
                name: "Launch Plan".to_string(),
                description: Some("original".to_string()),
            },
        )
        .await;

        let updated = ProjectRepo::update(
            &store,
            &created.id,
            &UpdateProject {
                status: Some(ProjectStatus::Completed),
                ..UpdateProject::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Launch Plan");
        assert_eq!(updated.description.as_deref(), Some("original"));
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_returns_none_for_unknown_id() {
        let store = MemoryStore::new();
        let result = ProjectRepo::update(&store, "999", &UpdateProject::default()).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = MemoryStore::new();
        let created = ProjectRepo::create(&store, &create_input("short-lived")).await;

        assert!(ProjectRepo::delete(&store, &created.id).await);
        assert!(ProjectRepo::find_by_id(&store, &created.id).await.is_none());
        assert!(!ProjectRepo::delete(&store, &created.id).await);
    }

    // --- id allocation under concurrency ---

    #[tokio::test]
    async fn concurrent_creates_never_share_an_id() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut set = tokio::task::JoinSet::new();
        for i in 0..32 {
            let store = store.clone();
            set.spawn(async move {
                ProjectRepo::create(&store, &create_input(&format!("p{i}"))).await.id
            });
        }

        let mut ids = Vec::new();
        while let Some(id) = set.join_next().await {
            ids.push(id.unwrap());
        }
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }
}
