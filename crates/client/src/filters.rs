//! URL-driven list state.
//!
//! The query string is the single source of truth for search, facet
//! filters, and the current page. Reading is lenient: an unrecognized key
//! or value falls back to its documented default rather than failing, so a
//! hand-edited or stale URL still renders. Writing is canonical: keys
//! holding their default value are omitted, in the stable order `search`,
//! `status`, `priority`, `page`, `pageSize`.
//!
//! One deliberate exception to omission: a filter change resets the page
//! and navigates with `page=1` written out, via
//! [`ProjectListQuery::query_string_with_page`]. Clearing filters navigates
//! to the bare path.

use std::str::FromStr;

use url::form_urlencoded;

use taskdeck_core::page::{Pagination, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use taskdeck_store::models::project::{ProjectFilter, ProjectStatus};
use taskdeck_store::models::task::{TaskFilter, TaskPriority, TaskStatus};

/// Query value that disables a facet.
const ALL: &str = "all";

/* --------------------------------------------------------------------------
   Facet
   -------------------------------------------------------------------------- */

/// A filter facet in URL form: either the `all` sentinel or one concrete
/// value of the facet's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facet<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Facet<T> {
    /// `All` disables the facet; `Only` narrows to one value.
    pub fn value(self) -> Option<T> {
        match self {
            Facet::All => None,
            Facet::Only(value) => Some(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }
}

impl<T: FromStr> Facet<T> {
    /// Parse a raw query value. `all` and anything unrecognized both map
    /// to `All`; list reads must not fail on a stale URL.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw == ALL {
            return Facet::All;
        }
        raw.parse().map(Facet::Only).unwrap_or(Facet::All)
    }
}

fn parse_page(raw: &str) -> u32 {
    raw.parse::<u32>().map(|page| page.max(1)).unwrap_or(1)
}

fn parse_page_size(raw: &str) -> u32 {
    raw.parse::<u32>()
        .map(|size| size.clamp(1, MAX_PAGE_SIZE))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

/* --------------------------------------------------------------------------
   Project list query
   -------------------------------------------------------------------------- */

/// Filter and pagination state of the project list, as carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectListQuery {
    pub search: String,
    pub status: Facet<ProjectStatus>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ProjectListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: Facet::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProjectListQuery {
    /// Read state out of a query string. Unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => state.search = value.into_owned(),
                "status" => state.status = Facet::parse_lenient(&value),
                "page" => state.page = parse_page(&value),
                "pageSize" => state.page_size = parse_page_size(&value),
                _ => {}
            }
        }
        state
    }

    /// Canonical query string: default-valued keys are omitted, so the
    /// default state serializes to the empty string (the bare path).
    pub fn query_string(&self) -> String {
        self.write(false)
    }

    /// Like [`Self::query_string`], but `page` is written even at 1. Used
    /// when navigating after a filter change, which resets the page.
    pub fn query_string_with_page(&self) -> String {
        self.write(true)
    }

    fn write(&self, explicit_page: bool) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        if let Facet::Only(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        if explicit_page || self.page != 1 {
            query.append_pair("page", &self.page.to_string());
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            query.append_pair("pageSize", &self.page_size.to_string());
        }
        query.finish()
    }

    /// New search text; resets to the first page.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// New status facet; resets to the first page.
    pub fn with_status(mut self, status: Facet<ProjectStatus>) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    /// Page navigation; filters stay put.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Everything back to defaults. Serializes to the bare path.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> ProjectFilter {
        ProjectFilter {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            status: self.status.value(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

/* --------------------------------------------------------------------------
   Task list query
   -------------------------------------------------------------------------- */

/// Filter and pagination state of a project's task list. Same rules as
/// [`ProjectListQuery`] plus the `priority` facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListQuery {
    pub search: String,
    pub status: Facet<TaskStatus>,
    pub priority: Facet<TaskPriority>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for TaskListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: Facet::All,
            priority: Facet::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TaskListQuery {
    /// Read state out of a query string. Unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => state.search = value.into_owned(),
                "status" => state.status = Facet::parse_lenient(&value),
                "priority" => state.priority = Facet::parse_lenient(&value),
                "page" => state.page = parse_page(&value),
                "pageSize" => state.page_size = parse_page_size(&value),
                _ => {}
            }
        }
        state
    }

    /// Canonical query string with default-valued keys omitted.
    pub fn query_string(&self) -> String {
        self.write(false)
    }

    /// Like [`Self::query_string`], but `page` is written even at 1.
    pub fn query_string_with_page(&self) -> String {
        self.write(true)
    }

    fn write(&self, explicit_page: bool) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        if let Facet::Only(status) = self.status {
            query.append_pair("status", status.as_str());
        }
        if let Facet::Only(priority) = self.priority {
            query.append_pair("priority", priority.as_str());
        }
        if explicit_page || self.page != 1 {
            query.append_pair("page", &self.page.to_string());
        }
        if self.page_size != DEFAULT_PAGE_SIZE {
            query.append_pair("pageSize", &self.page_size.to_string());
        }
        query.finish()
    }

    /// New search text; resets to the first page.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// New status facet; resets to the first page.
    pub fn with_status(mut self, status: Facet<TaskStatus>) -> Self {
        self.status = status;
        self.page = 1;
        self
    }

    /// New priority facet; resets to the first page.
    pub fn with_priority(mut self, priority: Facet<TaskPriority>) -> Self {
        self.priority = priority;
        self.page = 1;
        self
    }

    /// Page navigation; filters stay put.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Everything back to defaults. Serializes to the bare path.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> TaskFilter {
        TaskFilter {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            status: self.status.value(),
            priority: self.priority.value(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

/* --------------------------------------------------------------------------
   Pager windowing
   -------------------------------------------------------------------------- */

/// Most page numbers a pager renders before collapsing runs into gaps.
const MAX_VISIBLE_PAGES: u32 = 5;

/// One rendered slot of a pager row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Number(u32),
    /// An elided run, rendered as an ellipsis.
    Gap,
}

/// The page numbers a pager shows for `current_page` of `total_pages`.
///
/// Up to five pages render in full. Longer ranges keep the first and last
/// page visible and a window around the current one, eliding the rest:
/// near the start `1 2 3 4 .. N`, near the end `1 .. N-3 N-2 N-1 N`, and
/// in the middle `1 .. c-1 c c+1 .. N`.
pub fn page_numbers(current_page: u32, total_pages: u32) -> Vec<PageSlot> {
    let mut slots = Vec::new();

    if total_pages <= MAX_VISIBLE_PAGES {
        for page in 1..=total_pages {
            slots.push(PageSlot::Number(page));
        }
    } else if current_page <= 3 {
        for page in 1..=4 {
            slots.push(PageSlot::Number(page));
        }
        slots.push(PageSlot::Gap);
        slots.push(PageSlot::Number(total_pages));
    } else if current_page >= total_pages - 2 {
        slots.push(PageSlot::Number(1));
        slots.push(PageSlot::Gap);
        for page in (total_pages - 3)..=total_pages {
            slots.push(PageSlot::Number(page));
        }
    } else {
        slots.push(PageSlot::Number(1));
        slots.push(PageSlot::Gap);
        for page in (current_page - 1)..=(current_page + 1) {
            slots.push(PageSlot::Number(page));
        }
        slots.push(PageSlot::Gap);
        slots.push(PageSlot::Number(total_pages));
    }

    slots
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
