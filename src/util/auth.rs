//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes apply identical unauthenticated redirect behavior. The
//! decision lives in [`RouteGuard`], a plain state machine, so the Leptos
//! effect that drives navigation stays a thin shell around it.
//!
//! DESIGN
//! ======
//! Nothing is decided until the auth phase resolves: a persisted token that
//! is still being verified must never bounce the user to the login page.
//! Once anonymous, the redirect fires once per anonymous episode; reaching
//! `Authenticated` re-arms it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthPhase, AuthState};

/// Whether auth has settled on "no user".
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    state.phase == AuthPhase::Anonymous
}

/// What a protected route should render right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardView {
    #[default]
    Loading,
    Protected,
    Redirecting,
}

/// A navigation the guard wants performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    /// Location the user asked for. Advisory only; nothing navigates back.
    pub from: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    pub view: GuardView,
    pub redirect: Option<Redirect>,
}

/// Redirect latch for one protected route.
#[derive(Clone, Debug)]
pub struct RouteGuard {
    login_path: String,
    redirected: bool,
    origin: Option<String>,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self { login_path: login_path.into(), redirected: false, origin: None }
    }

    /// Decide the view for `state`, emitting a redirect at most once per
    /// anonymous episode.
    pub fn evaluate(&mut self, state: &AuthState, requested: &str) -> GuardOutcome {
        const LOADING: GuardOutcome = GuardOutcome { view: GuardView::Loading, redirect: None };
        if !state.phase.is_resolved() {
            return LOADING;
        }
        if should_redirect_unauth(state) {
            if self.redirected {
                return GuardOutcome { view: GuardView::Redirecting, redirect: None };
            }
            self.redirected = true;
            self.origin = Some(requested.to_owned());
            return GuardOutcome {
                view: GuardView::Redirecting,
                redirect: Some(Redirect { to: self.login_path.clone(), from: requested.to_owned() }),
            };
        }
        // Authenticated, but the user record may still be on its way.
        if !state.is_authenticated() {
            return LOADING;
        }
        self.redirected = false;
        GuardOutcome { view: GuardView::Protected, redirect: None }
    }

    /// The location recorded by the last redirect.
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// Drive `guard` from the auth signal, replacing the history entry on
/// redirect. Returns the view the route should render.
pub fn install_unauth_redirect<R, F>(
    auth: RwSignal<AuthState>,
    mut guard: RouteGuard,
    requested: R,
    navigate: F,
) -> ReadSignal<GuardView>
where
    R: Fn() -> String + 'static,
    F: Fn(&str, NavigateOptions) + 'static,
{
    let view = RwSignal::new(GuardView::Loading);
    Effect::new(move |_| {
        let outcome = auth.with(|state| guard.evaluate(state, &requested()));
        if view.get_untracked() != outcome.view {
            view.set(outcome.view);
        }
        if let Some(redirect) = outcome.redirect {
            log::debug!("unauthenticated access to {}, redirecting to {}", redirect.from, redirect.to);
            navigate(&redirect.to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
    view.read_only()
}
