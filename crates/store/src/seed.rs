//! Demo seed data: twelve projects and a starter task set.

use chrono::{TimeZone, Utc};

use taskdeck_core::types::Timestamp;

use crate::models::project::{Project, ProjectStatus};
use crate::models::task::{Task, TaskPriority, TaskStatus};
use crate::store::MemoryStore;

fn day(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn project(
    id: &str,
    name: &str,
    description: &str,
    status: ProjectStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        status,
        created_at,
        updated_at,
    }
}

fn task(
    id: &str,
    project_id: &str,
    title: &str,
    description: &str,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: Timestamp,
) -> Task {
    Task {
        id: id.to_string(),
        project_id: project_id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        created_at,
        updated_at: created_at,
    }
}

impl MemoryStore {
    /// A fresh zero-latency store pre-loaded with the demo data set.
    pub async fn seeded() -> Self {
        let store = Self::new();
        store.seed_demo_data().await;
        store
    }

    /// Load the demo projects and tasks. Appends to whatever is already
    /// present; intended for a freshly created store.
    pub async fn seed_demo_data(&self) {
        use ProjectStatus::{Active, Archived, Completed};
        use TaskPriority::{High, Low, Medium};
        use TaskStatus::{Doing, Done, Todo};

        let now = Utc::now();
        let projects = vec![
            project(
                "1",
                "Website Redesign",
                "Complete overhaul of company website with modern design",
                Active,
                day(2024, 1, 15),
                now,
            ),
            project(
                "2",
                "Mobile App Development",
                "iOS and Android native app development",
                Active,
                day(2024, 1, 20),
                now,
            ),
            project(
                "3",
                "API Integration",
                "Third-party API integration and migration",
                Completed,
                day(2023, 12, 10),
                day(2024, 1, 5),
            ),
            project(
                "4",
                "Database Migration",
                "Migrate from PostgreSQL to MongoDB",
                Active,
                day(2024, 1, 25),
                now,
            ),
            project(
                "5",
                "Security Audit",
                "Comprehensive security audit and fixes",
                Completed,
                day(2023, 11, 1),
                day(2023, 12, 15),
            ),
            project(
                "6",
                "Performance Optimization",
                "Frontend and backend performance improvements",
                Active,
                day(2024, 2, 1),
                now,
            ),
            project(
                "7",
                "Documentation Portal",
                "Internal documentation and knowledge base",
                Archived,
                day(2023, 10, 1),
                day(2023, 12, 1),
            ),
            project(
                "8",
                "Analytics Dashboard",
                "Real-time analytics and reporting dashboard",
                Active,
                day(2024, 1, 30),
                now,
            ),
            project(
                "9",
                "Payment Gateway",
                "Stripe payment integration",
                Completed,
                day(2023, 9, 15),
                day(2023, 11, 20),
            ),
            project(
                "10",
                "Email Campaign System",
                "Automated email marketing campaigns",
                Active,
                day(2024, 2, 5),
                now,
            ),
            project(
                "11",
                "Chat Feature",
                "Real-time chat with WebSocket",
                Active,
                day(2024, 2, 10),
                now,
            ),
            project(
                "12",
                "CI/CD Pipeline",
                "GitHub Actions CI/CD automation",
                Completed,
                day(2023, 8, 1),
                day(2023, 9, 10),
            ),
        ];

        let tasks = vec![
            task(
                "101",
                "1",
                "Audit current page inventory",
                "Catalog every page and template on the existing site",
                Done,
                Medium,
                day(2024, 1, 16),
            ),
            task(
                "102",
                "1",
                "Design new homepage mockups",
                "Figma mockups for desktop and mobile breakpoints",
                Doing,
                High,
                day(2024, 1, 18),
            ),
            task(
                "103",
                "1",
                "Migrate blog content",
                "Port existing posts into the new CMS",
                Todo,
                Low,
                day(2024, 1, 22),
            ),
            task(
                "104",
                "1",
                "Set up staging environment",
                "",
                Todo,
                Medium,
                day(2024, 1, 22),
            ),
            task(
                "105",
                "2",
                "Define MVP feature list",
                "Agree scope for the first store release",
                Done,
                High,
                day(2024, 1, 21),
            ),
            task(
                "106",
                "2",
                "Build login screen",
                "Email and password form with validation states",
                Doing,
                Medium,
                day(2024, 1, 27),
            ),
            task(
                "107",
                "2",
                "Set up push notifications",
                "",
                Todo,
                Medium,
                day(2024, 2, 2),
            ),
            task(
                "108",
                "4",
                "Inventory existing schemas",
                "List every table and its access patterns",
                Doing,
                High,
                day(2024, 1, 26),
            ),
            task(
                "109",
                "4",
                "Write data migration scripts",
                "",
                Todo,
                High,
                day(2024, 1, 28),
            ),
            task(
                "110",
                "8",
                "Wire up metrics ingestion",
                "Stream events into the aggregation pipeline",
                Todo,
                Medium,
                day(2024, 2, 1),
            ),
        ];

        let (project_count, task_count) = (projects.len(), tasks.len());
        self.projects.write().await.extend(projects);
        self.tasks.write().await.extend(tasks);
        tracing::debug!(projects = project_count, tasks = task_count, "seeded demo data");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_holds_the_demo_set() {
        let store = MemoryStore::seeded().await;
        let projects = store.projects.read().await;
        let tasks = store.tasks.read().await;

        assert_eq!(projects.len(), 12);
        assert_eq!(projects[0].name, "Website Redesign");
        assert_eq!(projects[11].name, "CI/CD Pipeline");
        assert_eq!(tasks.len(), 10);
        assert!(tasks.iter().all(|t| projects.iter().any(|p| p.id == t.project_id)));
    }

    #[tokio::test]
    async fn seed_timestamps_are_well_formed() {
        let store = MemoryStore::seeded().await;
        let projects = store.projects.read().await;
        assert!(projects.iter().all(|p| p.updated_at >= p.created_at));
    }
}
