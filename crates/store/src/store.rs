//! The shared in-memory store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use taskdeck_core::types::EntityId;

use crate::models::project::Project;
use crate::models::task::Task;

/// In-memory collections behind per-collection async locks.
///
/// Collections keep insertion order. Operations that touch both collections
/// always lock `projects` before `tasks`.
///
/// Writes are last-write-wins: two clients updating the same record race on
/// lock acquisition and the later holder's merge survives. Callers that need
/// stronger coordination do not get it here.
pub struct MemoryStore {
    pub(crate) projects: RwLock<Vec<Project>>,
    pub(crate) tasks: RwLock<Vec<Task>>,
    latency: Duration,
    last_id_ms: AtomicU64,
}

impl MemoryStore {
    /// An empty store with no artificial latency. The default for tests and
    /// for servers that want real response times.
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// An empty store that sleeps for `latency` before every operation,
    /// simulating a network round-trip.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
            tasks: RwLock::new(Vec::new()),
            latency,
            last_id_ms: AtomicU64::new(0),
        }
    }

    /// Sleep for the configured latency. Called by every repository method
    /// before it takes any lock, so a slow store never blocks other callers.
    pub(crate) async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Allocate the next record id.
    ///
    /// Ids are millisecond timestamps, bumped past the previous allocation
    /// when two calls land in the same millisecond. Ids are therefore
    /// unique and strictly increasing for the lifetime of the store.
    pub(crate) fn allocate_id(&self) -> EntityId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = self.last_id_ms.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last_id_ms.compare_exchange(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
