//! Authenticated session tracking.

use bankist_shared::types::{AccountId, SessionId};
use chrono::{DateTime, Utc};

use crate::account::Handle;

/// The currently authenticated account context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    /// Unique per successful authentication.
    pub session_id: SessionId,
    /// The authenticated account.
    pub account_id: AccountId,
    /// Handle the account logged in with.
    pub handle: Handle,
    /// When the session began.
    pub started_at: DateTime<Utc>,
}

/// At most one authenticated session.
///
/// Lifecycle: `Unauthenticated -> Authenticated -> Unauthenticated`.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Option<ActiveSession>,
}

impl SessionState {
    /// Creates an unauthenticated state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh session, replacing any existing one.
    pub fn begin(&mut self, account_id: AccountId, handle: Handle) -> &ActiveSession {
        self.current.insert(ActiveSession {
            session_id: SessionId::new(),
            account_id,
            handle,
            started_at: Utc::now(),
        })
    }

    /// Ends the session unconditionally, returning it if one was active.
    pub fn clear(&mut self) -> Option<ActiveSession> {
        self.current.take()
    }

    /// Ends the session only if it is still `session_id`.
    ///
    /// Returns true if a session was cleared.
    pub fn expire(&mut self, session_id: SessionId) -> bool {
        if self.is_current(session_id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Returns the active session.
    #[must_use]
    pub const fn current(&self) -> Option<&ActiveSession> {
        self.current.as_ref()
    }

    /// Returns true if `session_id` is the active session.
    #[must_use]
    pub fn is_current(&self, session_id: SessionId) -> bool {
        self.current
            .as_ref()
            .is_some_and(|s| s.session_id == session_id)
    }

    /// Returns true if an account is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
