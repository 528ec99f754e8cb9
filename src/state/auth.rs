//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Broadcast by the auth controller after every transition and mirrored into
//! a Leptos signal. Used by the route guard and user-aware components to
//! coordinate login redirects and identity-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

use super::session::Session;

/// Where the session sits in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Startup; persisted token not yet checked.
    #[default]
    Unknown,
    /// Persisted token found, profile fetch in flight.
    Verifying,
    Authenticated,
    Anonymous,
}

impl AuthPhase {
    /// Whether the phase is final enough to route on.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Authenticated | Self::Anonymous)
    }
}

/// Snapshot of authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { phase: AuthPhase::Unknown, user: None, loading: true, error: None }
    }
}

impl AuthState {
    pub(crate) fn from_session(phase: AuthPhase, session: &Session) -> Self {
        Self { phase, user: session.user.clone(), loading: session.loading, error: session.last_error.clone() }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.user.is_some()
    }
}
