//! Auth controller: the session state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Built once at the composition root and injected through context. Pages
//! call `login`/`register`/`logout`; the app shell calls `start` once to
//! verify a persisted token. The navbar splits logout into `end_session`
//! and a background `revoke` so it can navigate without waiting on the
//! server. Every transition is broadcast to subscribers.
//!
//! ```text
//! Unknown --start, token--> Verifying --/auth/me ok--> Authenticated
//!    |                          |                           |
//!    +--start, no token--> Anonymous <--/auth/me failed-----+--logout
//!                            |   ^
//!                            +---+ login failed
//! Anonymous --login ok--> Authenticated
//! ```
//!
//! ERROR HANDLING
//! ==============
//! Nothing escapes: every failure ends in a transition plus a message in
//! [`AuthState::error`]. Overlapping calls race and the last response to
//! resolve wins; callers should not issue overlapping logins.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::ApiClient;

use super::auth::{AuthPhase, AuthState};
use super::session::SessionStore;

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Handle returned by [`AuthController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

struct Inner {
    phase: AuthPhase,
    store: SessionStore,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Orchestrates auth calls and owns the session store. Clones share state.
#[derive(Clone)]
pub struct AuthController {
    api: ApiClient,
    inner: Arc<Mutex<Inner>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl AuthController {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self {
            api,
            inner: Arc::new(Mutex::new(Inner { phase: AuthPhase::Unknown, store })),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// The gateway this controller authenticates.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        let inner = self.lock();
        AuthState::from_session(inner.phase, inner.store.session())
    }

    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.lock().phase
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        let inner = self.lock();
        inner.phase == AuthPhase::Authenticated && inner.store.is_authenticated()
    }

    /// Register `listener` for every subsequent transition.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) -> SubscriptionId {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.next_id += 1;
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    /// Resolve the startup phase from the persisted token.
    ///
    /// Acts only from `Unknown`, so at most one verification is ever in
    /// flight; later calls are no-ops.
    pub async fn start(&self) {
        let token = {
            let mut inner = self.lock();
            if inner.phase != AuthPhase::Unknown {
                log::debug!("auth start ignored in phase {:?}", inner.phase);
                return;
            }
            let token = inner.store.restore();
            if token.is_some() {
                inner.phase = AuthPhase::Verifying;
                inner.store.begin();
            } else {
                inner.store.clear();
                inner.phase = AuthPhase::Anonymous;
            }
            token
        };
        self.broadcast();

        let Some(token) = token else {
            return;
        };
        self.api.set_token(Some(token.clone()));
        match self.api.fetch_current_user().await {
            Ok(user) => {
                log::debug!("persisted session verified for user {}", user.id);
                self.transition(|inner| {
                    inner.store.set_session(token, user);
                    inner.phase = AuthPhase::Authenticated;
                });
            }
            Err(err) => {
                log::warn!("persisted session rejected, clearing: {err}");
                self.api.set_token(None);
                self.transition(|inner| {
                    inner.store.clear();
                    inner.phase = AuthPhase::Anonymous;
                });
            }
        }
    }

    /// Log in with email and password. Returns whether it succeeded; the
    /// failure message is in [`AuthState::error`].
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.transition(|inner| inner.store.begin());
        match self.api.login(email, password).await {
            Ok(login) => {
                self.api.set_token(Some(login.token.clone()));
                self.transition(|inner| {
                    inner.store.set_session(login.token, login.user);
                    inner.phase = AuthPhase::Authenticated;
                });
                true
            }
            Err(err) => {
                log::warn!("login failed: {err}");
                self.api.set_token(None);
                let message = err.message_or(LOGIN_FAILED);
                self.transition(|inner| {
                    inner.store.clear();
                    inner.store.fail(message);
                    inner.phase = AuthPhase::Anonymous;
                });
                false
            }
        }
    }

    /// Create an account. The phase is unchanged either way.
    ///
    /// # Errors
    ///
    /// Returns the user-facing failure message, also recorded in
    /// [`AuthState::error`].
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), String> {
        self.transition(|inner| inner.store.begin());
        match self.api.register(username, email, password).await {
            Ok(()) => {
                self.transition(|inner| inner.store.finish());
                Ok(())
            }
            Err(err) => {
                log::warn!("registration failed: {err}");
                let message = err.message_or(REGISTER_FAILED);
                self.transition(|inner| inner.store.fail(message.clone()));
                Err(message)
            }
        }
    }

    /// End the session. Local state is cleared first and unconditionally;
    /// the server is then asked to revoke the old token on a best-effort
    /// basis.
    pub async fn logout(&self) {
        let token = self.end_session();
        self.revoke(token).await;
    }

    /// Clear the session locally and return the token that was dropped, for
    /// [`AuthController::revoke`]. Takes effect before returning.
    pub fn end_session(&self) -> Option<String> {
        self.api.set_token(None);
        self.transition(|inner| {
            let token = inner.store.token().map(str::to_owned);
            inner.store.clear();
            inner.store.clear_error();
            inner.phase = AuthPhase::Anonymous;
            token
        })
    }

    /// Ask the server to invalidate `token`. Failures are logged only.
    pub async fn revoke(&self, token: Option<String>) {
        if token.is_none() {
            return;
        }
        if let Err(err) = self.api.revoke(token).await {
            log::warn!("logout request failed, local session already cleared: {err}");
        }
    }

    pub fn clear_error(&self) {
        self.transition(|inner| inner.store.clear_error());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition<R>(&self, apply: impl FnOnce(&mut Inner) -> R) -> R {
        let result = {
            let mut inner = self.lock();
            apply(&mut inner)
        };
        self.broadcast();
        result
    }

    fn broadcast(&self) {
        let state = self.state();
        log::debug!("auth phase {:?}, loading {}", state.phase, state.loading);
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&state);
        }
    }
}
