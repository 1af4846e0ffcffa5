//! Task entity model and DTOs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use taskdeck_core::types::{EntityId, Timestamp};
use taskdeck_core::CoreError;

/* --- status / priority --------------------------------------------------- */

/// Board column a task sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(CoreError::Validation(format!(
                "Invalid task status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(CoreError::Validation(format!(
                "Invalid task priority: {other}"
            ))),
        }
    }
}

/* --- entity -------------------------------------------------------------- */

/// A task record in its wire shape. `description` is always present and may
/// be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub project_id: EntityId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/* --- DTOs ---------------------------------------------------------------- */

/// DTO for creating a new task. `project_id` must reference an existing
/// project; absent optional fields take the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub project_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// DTO for updating an existing task. All fields are optional; absent fields
/// keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/* --- filter -------------------------------------------------------------- */

/// Filter predicate for task list queries.
///
/// `search` is a case-insensitive substring match over title and description;
/// `None` for status or priority matches anything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// True when `task` passes every set field.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn task(title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        let now = Utc::now();
        Task {
            id: "1".to_string(),
            project_id: "1".to_string(),
            title: title.to_string(),
            description: String::new(),
            status,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.matches(&task(
            "Draft homepage copy",
            TaskStatus::Done,
            TaskPriority::Low,
        )));
    }

    #[test]
    fn search_is_case_insensitive_over_title() {
        let filter = TaskFilter {
            search: Some("HOMEPAGE".to_string()),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&task(
            "Draft homepage copy",
            TaskStatus::Todo,
            TaskPriority::Medium,
        )));
    }

    #[test]
    fn search_also_matches_description() {
        let mut t = task("Wireframes", TaskStatus::Todo, TaskPriority::Medium);
        t.description = "Figma mockups for every breakpoint".to_string();
        let filter = TaskFilter {
            search: Some("figma".to_string()),
            ..TaskFilter::default()
        };
        assert!(filter.matches(&t));
    }

    #[test]
    fn status_and_priority_combine_as_conjunction() {
        let filter = TaskFilter {
            search: None,
            status: Some(TaskStatus::Doing),
            priority: Some(TaskPriority::High),
        };
        assert!(filter.matches(&task("A", TaskStatus::Doing, TaskPriority::High)));
        assert!(!filter.matches(&task("B", TaskStatus::Doing, TaskPriority::Low)));
        assert!(!filter.matches(&task("C", TaskStatus::Done, TaskPriority::High)));
    }

    #[test]
    fn status_and_priority_strings_round_trip() {
        for status in [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
            assert_eq!(priority.as_str().parse::<TaskPriority>().unwrap(), priority);
        }
        assert!("blocked".parse::<TaskStatus>().is_err());
        assert!("urgent".parse::<TaskPriority>().is_err());
    }
}
