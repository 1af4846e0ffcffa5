//! Transient user notices (toasts).
//!
//! [`NoticeHub`] is the client-side fan-out point for mutation feedback.
//! Controllers publish onto it; any number of subscribers (a terminal
//! renderer, a test) receive every notice through a broadcast channel. The
//! hub also retains the currently visible notices, each of which expires
//! on its own timer unless dismissed first.
//!
//! Designed to be shared via `Arc<NoticeHub>` across controllers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Visual register of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
    Warning,
}

/// One message shown to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// NoticeHub
// ---------------------------------------------------------------------------

/// How long a notice stays visible unless dismissed.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

/// Buffer capacity for the broadcast channel.
const CHANNEL_CAPACITY: usize = 256;

/// Retained list plus broadcast fan-out for notices.
pub struct NoticeHub {
    retained: Arc<RwLock<Vec<Notice>>>,
    sender: broadcast::Sender<Notice>,
    ttl: Duration,
}

impl NoticeHub {
    /// A hub expiring notices after [`DEFAULT_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// A hub with a custom expiry. `Duration::ZERO` disables auto-expiry;
    /// notices then stay until dismissed or cleared.
    pub fn with_ttl(ttl: Duration) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            retained: Arc::new(RwLock::new(Vec::new())),
            sender,
            ttl,
        }
    }

    /// Post a notice: retain it, broadcast it, and schedule its expiry.
    /// Returns the id usable with [`Self::dismiss`].
    pub async fn publish(&self, level: NoticeLevel, message: impl Into<String>) -> Uuid {
        let notice = Notice {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            posted_at: Utc::now(),
        };

        self.retained.write().await.push(notice.clone());
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(notice.clone());

        if !self.ttl.is_zero() {
            let retained = Arc::clone(&self.retained);
            let ttl = self.ttl;
            let id = notice.id;
            tokio::spawn(async move {
                tokio::time::sleep(ttl).await;
                retained.write().await.retain(|n| n.id != id);
            });
        }

        notice.id
    }

    pub async fn success(&self, message: impl Into<String>) -> Uuid {
        self.publish(NoticeLevel::Success, message).await
    }

    pub async fn error(&self, message: impl Into<String>) -> Uuid {
        self.publish(NoticeLevel::Error, message).await
    }

    pub async fn info(&self, message: impl Into<String>) -> Uuid {
        self.publish(NoticeLevel::Info, message).await
    }

    /// The notices currently visible, oldest first.
    pub async fn active(&self) -> Vec<Notice> {
        self.retained.read().await.clone()
    }

    /// Remove one notice ahead of its expiry. Unknown ids are a no-op.
    pub async fn dismiss(&self, id: Uuid) {
        self.retained.write().await.retain(|n| n.id != id);
    }

    /// Remove every visible notice at once.
    pub async fn clear(&self) {
        self.retained.write().await.clear();
    }

    /// Subscribe to every notice published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeHub {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
