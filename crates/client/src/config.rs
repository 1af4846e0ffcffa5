//! Client configuration and backend composition.
//!
//! The backend behind the repository ports is chosen once, here, when the
//! client starts. Everything downstream of [`compose`] holds
//! `Arc<dyn ProjectRepository>` / `Arc<dyn TaskRepository>` and cannot tell
//! the two apart.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use taskdeck_store::MemoryStore;

use crate::error::ClientResult;
use crate::memory::{MemoryProjects, MemoryTasks};
use crate::remote::{ApiClient, HttpProjects, HttpTasks};
use crate::repository::{ProjectRepository, TaskRepository};

/// Which backend serves the repository ports.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Self-contained in-memory store with simulated latency. The default;
    /// useful offline and in tests.
    Memory {
        /// Artificial delay before every operation, in milliseconds.
        latency_ms: u64,
        /// Load the demo projects and tasks on startup.
        seed_demo_data: bool,
    },
    /// A running taskdeck API server.
    Remote {
        /// Base URL including the `/api` prefix.
        base_url: Url,
    },
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend: Backend,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                     |
    /// |----------------------------|-----------------------------|
    /// | `TASKDECK_BACKEND`         | `memory`                    |
    /// | `TASKDECK_API_BASE_URL`    | `http://localhost:3000/api` |
    /// | `TASKDECK_STORE_LATENCY_MS`| `300`                       |
    /// | `TASKDECK_SEED_DEMO_DATA`  | `true`                      |
    ///
    /// The base URL and latency/seed settings apply only to their
    /// respective backends; the others are read but ignored.
    pub fn from_env() -> Self {
        let backend = std::env::var("TASKDECK_BACKEND").unwrap_or_else(|_| "memory".into());

        let backend = match backend.as_str() {
            "remote" => {
                let base_url = std::env::var("TASKDECK_API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/api".into());
                Backend::Remote {
                    base_url: base_url
                        .parse()
                        .expect("TASKDECK_API_BASE_URL must be a valid URL"),
                }
            }
            "memory" => {
                let latency_ms: u64 = std::env::var("TASKDECK_STORE_LATENCY_MS")
                    .unwrap_or_else(|_| "300".into())
                    .parse()
                    .expect("TASKDECK_STORE_LATENCY_MS must be a valid u64");

                let seed_demo_data: bool = std::env::var("TASKDECK_SEED_DEMO_DATA")
                    .unwrap_or_else(|_| "true".into())
                    .parse()
                    .expect("TASKDECK_SEED_DEMO_DATA must be true or false");

                Backend::Memory {
                    latency_ms,
                    seed_demo_data,
                }
            }
            other => panic!("TASKDECK_BACKEND must be memory or remote, got {other}"),
        };

        Self { backend }
    }
}

impl Default for ClientConfig {
    /// Seeded in-memory backend with the stock 300ms latency.
    fn default() -> Self {
        Self {
            backend: Backend::Memory {
                latency_ms: 300,
                seed_demo_data: true,
            },
        }
    }
}

/// The composed repository ports, ready to hand to view controllers.
#[derive(Clone)]
pub struct Backends {
    pub projects: Arc<dyn ProjectRepository>,
    pub tasks: Arc<dyn TaskRepository>,
}

/// Build both repository ports against the configured backend.
///
/// The memory backend shares one store between the two ports, so a project
/// delete cascades onto the tasks the task port sees. The remote backend
/// shares one HTTP connection pool.
pub async fn compose(config: &ClientConfig) -> ClientResult<Backends> {
    match &config.backend {
        Backend::Memory {
            latency_ms,
            seed_demo_data,
        } => {
            let store = Arc::new(MemoryStore::with_latency(Duration::from_millis(*latency_ms)));
            if *seed_demo_data {
                store.seed_demo_data().await;
            }
            tracing::info!(latency_ms, seeded = seed_demo_data, "using in-memory backend");
            Ok(Backends {
                projects: Arc::new(MemoryProjects::new(Arc::clone(&store))),
                tasks: Arc::new(MemoryTasks::new(store)),
            })
        }
        Backend::Remote { base_url } => {
            let api = Arc::new(ApiClient::new(base_url.clone())?);
            tracing::info!(base_url = %base_url, "using remote backend");
            Ok(Backends {
                projects: Arc::new(HttpProjects::new(Arc::clone(&api))),
                tasks: Arc::new(HttpTasks::new(api)),
            })
        }
    }
}
