//! Client session state and credential persistence.
//!
//! Authentication here is a mock: any non-empty email and password pair is
//! accepted after a simulated round-trip, which is exactly what the system
//! needs before a real identity provider exists. The interesting parts are
//! the state machine and the persistence contract:
//!
//! - [`SessionState`] moves `Anonymous -> Authenticating -> Authenticated`
//!   and falls back to `Anonymous` on failure or logout.
//! - Only the user profile is persisted through a [`CredentialStore`].
//!   The bearer token is deliberately kept in memory, so a restored
//!   session has `token: None` until the next login.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use crate::error::{ClientError, ClientResult};

/* --------------------------------------------------------------------------
   Session state
   -------------------------------------------------------------------------- */

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// An established session. `token` is absent when the session was restored
/// from disk rather than freshly logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: Option<String>,
}

/// Where the client sits in the authentication lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    /// A login call is in flight.
    Authenticating,
    Authenticated(Session),
}

/* --------------------------------------------------------------------------
   Credential stores
   -------------------------------------------------------------------------- */

/// Persistence port for the session's user profile.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored profile, or `None` when nobody has logged in.
    async fn load_user(&self) -> ClientResult<Option<User>>;

    async fn save_user(&self, user: &User) -> ClientResult<()>;

    /// Forget the stored profile. Idempotent.
    async fn clear(&self) -> ClientResult<()>;
}

const APP_DIR: &str = "taskdeck";
const USER_FILE: &str = "auth_user.json";

/// [`CredentialStore`] writing a JSON file under the OS config directory,
/// for example `~/.config/taskdeck/auth_user.json`.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store under the platform config directory.
    pub fn new() -> ClientResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ClientError::Unknown("Cannot determine config directory".to_string()))?;
        Ok(Self {
            path: config_dir.join(APP_DIR).join(USER_FILE),
        })
    }

    /// Store at an explicit path. Mainly for tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    async fn ensure_parent_dir(&self) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::Unknown(format!("Failed to create config directory: {e}")))?;
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load_user(&self) -> ClientResult<Option<User>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // Missing file simply means nobody is logged in.
            Err(_) => return Ok(None),
        };

        let user: User = serde_json::from_str(&content)
            .map_err(|e| ClientError::Unknown(format!("Stored session is not readable: {e}")))?;
        Ok(Some(user))
    }

    async fn save_user(&self, user: &User) -> ClientResult<()> {
        self.ensure_parent_dir().await?;

        let content = serde_json::to_string_pretty(user)
            .map_err(|e| ClientError::Unknown(format!("Failed to encode session: {e}")))?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| ClientError::Unknown(format!("Failed to write session file: {e}")))?;

        // Profile data is not a secret, but it is nobody else's business
        // either. Owner read/write only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)
                .await
                .map_err(|e| ClientError::Unknown(format!("Failed to stat session file: {e}")))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)
                .await
                .map_err(|e| ClientError::Unknown(format!("Failed to restrict session file: {e}")))?;
        }

        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Unknown(format!(
                "Failed to remove session file: {e}"
            ))),
        }
    }
}

/// [`CredentialStore`] holding the profile in memory. For tests and for
/// environments without a writable config directory.
#[derive(Default)]
pub struct MemoryCredentialStore {
    user: RwLock<Option<User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load_user(&self) -> ClientResult<Option<User>> {
        Ok(self.user.read().await.clone())
    }

    async fn save_user(&self, user: &User) -> ClientResult<()> {
        *self.user.write().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.user.write().await = None;
        Ok(())
    }
}

/* --------------------------------------------------------------------------
   Session manager
   -------------------------------------------------------------------------- */

/// Simulated auth round-trip, applied before the credential check.
const AUTH_LATENCY: Duration = Duration::from_millis(500);

/// Owns the session state machine and the credential store behind it.
///
/// Designed to be shared via `Arc<SessionManager>`; every method takes
/// `&self` and serializes access through the internal lock.
pub struct SessionManager {
    state: RwLock<SessionState>,
    credentials: Arc<dyn CredentialStore>,
    latency: Duration,
}

impl SessionManager {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        Self::with_latency(credentials, AUTH_LATENCY)
    }

    /// Override the simulated round-trip. Tests pass `Duration::ZERO`.
    pub fn with_latency(credentials: Arc<dyn CredentialStore>, latency: Duration) -> Self {
        Self {
            state: RwLock::new(SessionState::Anonymous),
            credentials,
            latency,
        }
    }

    /// Restore a persisted session on startup.
    ///
    /// A stored profile moves the state straight to `Authenticated` with
    /// `token: None`. An unreadable store is logged, wiped, and treated as
    /// nobody being logged in; startup never fails over it.
    pub async fn initialize(&self) -> ClientResult<()> {
        match self.credentials.load_user().await {
            Ok(Some(user)) => {
                tracing::debug!(user = %user.email, "restored persisted session");
                *self.state.write().await = SessionState::Authenticated(Session {
                    user,
                    token: None,
                });
            }
            Ok(None) => {
                *self.state.write().await = SessionState::Anonymous;
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not restore session, starting anonymous");
                if let Err(e) = self.credentials.clear().await {
                    tracing::warn!(error = %e, "could not clear broken session store");
                }
                *self.state.write().await = SessionState::Anonymous;
            }
        }
        Ok(())
    }

    /// Authenticate with the mock provider.
    ///
    /// Empty email or password is rejected; any other pair succeeds after
    /// the simulated round-trip. On success the profile is persisted and
    /// the state carries a fresh bearer token.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        *self.state.write().await = SessionState::Authenticating;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if email.is_empty() || password.is_empty() {
            *self.state.write().await = SessionState::Anonymous;
            return Err(ClientError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = User {
            id: "1".to_string(),
            // The display name is the email's local part.
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
        };
        let token = format!("mock-jwt-token-{}", Utc::now().timestamp_millis());

        // Persistence failure downgrades to a session that will not
        // survive a restart; the login itself still succeeds.
        if let Err(e) = self.credentials.save_user(&user).await {
            tracing::warn!(error = %e, "could not persist session");
        }

        *self.state.write().await = SessionState::Authenticated(Session {
            user: user.clone(),
            token: Some(token),
        });
        tracing::info!(user = %user.email, "logged in");
        Ok(user)
    }

    /// End the session and forget the persisted profile.
    pub async fn logout(&self) -> ClientResult<()> {
        *self.state.write().await = SessionState::Anonymous;
        self.credentials.clear().await?;
        tracing::info!("logged out");
        Ok(())
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(session) => Some(session.user.clone()),
            _ => None,
        }
    }

    pub async fn token(&self) -> Option<String> {
        match &*self.state.read().await {
            SessionState::Authenticated(session) => session.token.clone(),
            _ => None,
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(&*self.state.read().await, SessionState::Authenticated(_))
    }

    /// Gate for operations that need a signed-in user.
    pub async fn require_authenticated(&self) -> ClientResult<User> {
        self.current_user()
            .await
            .ok_or_else(|| ClientError::Unauthorized("Not authenticated".to_string()))
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
