use std::sync::Arc;

use taskdeck_store::MemoryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The in-memory data store backing every resource.
    pub store: Arc<MemoryStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
