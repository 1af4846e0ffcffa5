//! Shared query parameter types for API handlers.
//!
//! List endpoints accept `search`, facet filters, and `page`/`pageSize`.
//! The sentinel value `"all"` disables a facet; an unrecognized facet value
//! is a 400 rather than an empty result set.

use std::str::FromStr;

use serde::Deserialize;

use taskdeck_core::error::CoreError;
use taskdeck_core::page::{Pagination, DEFAULT_PAGE_SIZE};
use taskdeck_store::models::project::ProjectFilter;
use taskdeck_store::models::task::TaskFilter;

use crate::error::AppError;

/// Sentinel meaning "do not filter on this facet".
const ALL: &str = "all";

fn parse_facet<T>(raw: Option<&str>) -> Result<Option<T>, AppError>
where
    T: FromStr<Err = CoreError>,
{
    match raw {
        None => Ok(None),
        Some(value) if value == ALL => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

/// Query parameters for `GET /api/projects`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ProjectListParams {
    /// Convert into a store filter, rejecting unknown status values.
    pub fn filter(&self) -> Result<ProjectFilter, AppError> {
        Ok(ProjectFilter {
            search: self.search.clone(),
            status: parse_facet(self.status.as_deref())?,
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Query parameters for task list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl TaskListParams {
    /// Convert into a store filter, rejecting unknown status or priority
    /// values.
    pub fn filter(&self) -> Result<TaskFilter, AppError> {
        Ok(TaskFilter {
            search: self.search.clone(),
            status: parse_facet(self.status.as_deref())?,
            priority: parse_facet(self.priority.as_deref())?,
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}
