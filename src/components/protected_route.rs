//! Route wrapper that only renders its children for an authenticated user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the publishing page. Shows a placeholder while the persisted session
//! is being verified and replaces the history entry with the login page once
//! auth settles on anonymous.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardView, RouteGuard, install_unauth_redirect};

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let config = expect_context::<ClientConfig>();
    let location = use_location();
    let navigate = use_navigate();

    let guard_view = install_unauth_redirect(
        auth,
        RouteGuard::new(config.login_path),
        move || location.pathname.get_untracked(),
        navigate,
    );

    move || match guard_view.get() {
        GuardView::Protected => children().into_any(),
        GuardView::Loading => view! { <p class="status">"Loading authentication..."</p> }.into_any(),
        GuardView::Redirecting => ().into_any(),
    }
}
