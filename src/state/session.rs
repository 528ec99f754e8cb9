//! Session store: the persisted token plus the in-memory profile.
//!
//! DESIGN
//! ======
//! Only the token is persisted; the user profile is re-derived after a reload
//! by verification. "Authenticated" means both halves are present, so a
//! restored but unverified token never counts.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use crate::net::types::User;
use crate::util::token_storage::TokenStorage;

/// Client-side record of authentication status and identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self { token: None, user: None, loading: true, last_error: None }
    }
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Owns the [`Session`] and writes the token through to storage.
pub struct SessionStore {
    session: Session,
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self { session: Session::default(), storage }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    /// Load the persisted token into memory without resolving a user.
    pub fn restore(&mut self) -> Option<String> {
        let token = self.storage.load();
        self.session.token.clone_from(&token);
        token
    }

    /// Record a verified session and persist its token.
    pub fn set_session(&mut self, token: String, user: User) {
        self.storage.save(&token);
        self.session.token = Some(token);
        self.session.user = Some(user);
        self.session.loading = false;
        self.session.last_error = None;
    }

    /// Forget the session and delete the persisted token.
    pub fn clear(&mut self) {
        self.storage.remove();
        self.session.token = None;
        self.session.user = None;
        self.session.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Mark an operation in flight, dropping any stale error.
    pub fn begin(&mut self) {
        self.session.loading = true;
        self.session.last_error = None;
    }

    /// Settle the in-flight operation without an error.
    pub fn finish(&mut self) {
        self.session.loading = false;
    }

    /// Settle the in-flight operation with a user-facing error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.session.loading = false;
        self.session.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.session.last_error = None;
    }
}
