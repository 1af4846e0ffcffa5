//! Client-side application layer for taskdeck.
//!
//! Everything a frontend needs short of rendering: repository ports with
//! swappable in-memory and HTTP backends ([`config::compose`] picks one at
//! startup), URL-shaped list queries with a debounced search input,
//! optimistic mutations that roll back on failure, a session state machine
//! with persisted credentials, and a notice hub for transient feedback.
//!
//! The view controllers ([`projects::ProjectListView`],
//! [`tasks::TaskBoardView`]) tie those pieces together; a UI owns one per
//! screen and calls [`close`](tasks::TaskBoardView::close) on teardown.

pub mod config;
pub mod debounce;
pub mod error;
pub mod filters;
pub mod memory;
pub mod notice;
pub mod optimistic;
pub mod projects;
pub mod remote;
pub mod repository;
pub mod session;
pub mod tasks;

pub use error::{ClientError, ClientResult};
