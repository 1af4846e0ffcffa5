//! Optimistic mutation bookkeeping.
//!
//! A mutation is applied to the visible list before the backend confirms
//! it. Everything needed to undo or finalize that application is captured
//! up front as a [`PendingMutation`] value: the temp id of an optimistic
//! insert, or a snapshot of the record as it stood before an update or
//! delete. `commit` and `rollback` are then pure list edits; no closure
//! captures, no stale-state reads.
//!
//! Reconciliation rules:
//! - A committed create swaps the temp record for the server one, in
//!   place, so the row keeps its position.
//! - A rolled-back delete reappends the snapshot at the end of the list,
//!   not at its original position.
//! - A commit or rollback whose target has meanwhile vanished from the
//!   list (a refresh, a concurrent delete) edits nothing.

use std::sync::atomic::{AtomicU64, Ordering};

use taskdeck_store::models::project::Project;
use taskdeck_store::models::task::Task;

/* --- temp ids ------------------------------------------------------------ */

/// Marks ids handed out locally before the backend has assigned one.
pub const TEMP_ID_PREFIX: &str = "temp-";

static NEXT_TEMP: AtomicU64 = AtomicU64::new(1);

/// Allocate the next temporary id, unique within this process. A counter
/// rather than wall-clock millis, so two creates in the same instant can
/// never collide.
pub fn next_temp_id() -> String {
    format!("{TEMP_ID_PREFIX}{}", NEXT_TEMP.fetch_add(1, Ordering::Relaxed))
}

/// True for ids allocated by [`next_temp_id`]. A temp id must never be
/// sent to a backend.
pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/* --- records ------------------------------------------------------------- */

/// Anything carrying a listable string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/* --- pending mutations --------------------------------------------------- */

/// The undo record of one optimistically applied mutation.
#[derive(Debug, Clone)]
pub enum PendingMutation<T> {
    /// An insert visible under a temporary id.
    Create { temp_id: String },
    /// An in-place edit; `prior` is the record before the merge.
    Update { prior: T },
    /// A removal; `prior` is the removed record.
    Delete { prior: T },
}

impl<T: Identified + Clone> PendingMutation<T> {
    /// The id this mutation is tracked under in the visible list.
    pub fn target_id(&self) -> &str {
        match self {
            PendingMutation::Create { temp_id } => temp_id,
            PendingMutation::Update { prior } | PendingMutation::Delete { prior } => prior.id(),
        }
    }

    /// Fold the backend-confirmed record into the list. `confirmed` is
    /// `None` for deletes, which have nothing left to reconcile.
    pub fn commit(self, items: &mut Vec<T>, confirmed: Option<T>) {
        let Some(confirmed) = confirmed else { return };
        let target = self.target_id().to_string();
        if let Some(slot) = items.iter_mut().find(|record| record.id() == target) {
            *slot = confirmed;
        }
    }

    /// Undo the optimistic application of this mutation.
    pub fn rollback(self, items: &mut Vec<T>) {
        match self {
            PendingMutation::Create { temp_id } => {
                items.retain(|record| record.id() != temp_id);
            }
            PendingMutation::Update { prior } => {
                let target = prior.id().to_string();
                if let Some(slot) = items.iter_mut().find(|record| record.id() == target) {
                    *slot = prior;
                }
            }
            PendingMutation::Delete { prior } => {
                items.push(prior);
            }
        }
    }
}

/* --- tests --------------------------------------------------------------- */
