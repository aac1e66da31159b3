//! Server-side session storage.
//!
//! A session holds the flash messages for one browser and, when the session
//! storage mode is active, that browser's entire list collection. Sessions
//! live in process memory and are addressed by a random [`SessionId`].
//!
//! There is no cross-request locking beyond the per-session lock taken for
//! the duration of a single operation: two concurrent requests from the same
//! browser are last-write-wins.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::List;

// =============================================================================
// Session Id
// =============================================================================

/// Opaque identifier carried in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a new random session id.
    ///
    /// **Note**: This is an impure function (side effect: random number generation).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value).map(Self)
    }
}

// =============================================================================
// Flash
// =============================================================================

/// One-shot status messages shown on the next rendered page only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash {
    /// Error message, if any.
    pub error: Option<String>,
    /// Success message, if any.
    pub success: Option<String>,
}

impl Flash {
    /// Returns true when there is nothing to show.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

// =============================================================================
// Session Data
// =============================================================================

/// Everything stored for one browser session.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Lists owned by this session (session storage mode only).
    pub lists: Vec<List>,
    /// Pending flash messages.
    pub flash: Flash,
}

impl SessionData {
    /// Returns true when there are no lists and no pending flash.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.flash.is_empty()
    }
}

// =============================================================================
// Session Handle
// =============================================================================

/// Shared, lock-protected handle to one session's data.
///
/// Cloning the handle is cheap; every clone refers to the same session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    data: Arc<RwLock<SessionData>>,
}

impl SessionHandle {
    /// Creates a handle around fresh, empty session data.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            data: Arc::new(RwLock::new(SessionData::default())),
        }
    }

    /// Returns the session id.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Runs `operation` with shared access to the session data.
    pub async fn read<T>(&self, operation: impl FnOnce(&SessionData) -> T) -> T {
        let guard = self.data.read().await;
        operation(&guard)
    }

    /// Runs `operation` with exclusive access to the session data.
    pub async fn write<T>(&self, operation: impl FnOnce(&mut SessionData) -> T) -> T {
        let mut guard = self.data.write().await;
        operation(&mut guard)
    }

    /// Stores an error flash, replacing any pending one.
    pub async fn flash_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.write(|data| data.flash.error = Some(message)).await;
    }

    /// Stores a success flash, replacing any pending one.
    pub async fn flash_success(&self, message: impl Into<String>) {
        let message = message.into();
        self.write(|data| data.flash.success = Some(message)).await;
    }

    /// Removes and returns the pending flash messages.
    pub async fn take_flash(&self) -> Flash {
        self.write(|data| std::mem::take(&mut data.flash)).await
    }

    /// Returns true when the session holds nothing worth keeping.
    pub async fn is_empty(&self) -> bool {
        self.read(SessionData::is_empty).await
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// Process-wide registry of live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session with this id, if it is still live.
    pub async fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Registers a session so later requests can find it by id.
    pub async fn insert(&self, handle: SessionHandle) {
        self.sessions.write().await.insert(handle.id(), handle);
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true when no session has been registered yet.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
