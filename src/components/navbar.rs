//! Top navigation bar.
//!
//! DESIGN
//! ======
//! Links switch on the auth snapshot: an authenticated user sees the
//! publishing link, a greeting and logout; everyone else sees login.
//! Logout navigates through a pending-path signal so event handlers only
//! capture `Send` handles. The session is cleared and the navigation queued
//! before the server revoke is sent, which runs in the background.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::controller::AuthController;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let controller = expect_context::<AuthController>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let pending_nav = RwSignal::new(None::<String>);
    Effect::new(move || {
        if let Some(path) = pending_nav.get() {
            pending_nav.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });

    let login_href = config.login_path.clone();
    let create_href = config.post_login_path.clone();
    let login_path = config.login_path.clone();
    let on_logout = move |_| {
        let token = controller.end_session();
        pending_nav.set(Some(login_path.clone()));
        let controller = controller.clone();
        leptos::task::spawn_local(async move { controller.revoke(token).await });
    };

    let greeting = move || auth.with(greeting_for);

    view! {
        <header class="navbar">
            <A href="/" attr:class="navbar__brand">{config.app_name}</A>
            <nav class="navbar__links">
                <A href="/" attr:class="navbar__link">"Home"</A>
                <Show
                    when=move || auth.with(AuthState::is_authenticated)
                    fallback=move || {
                        view! {
                            <A href=login_href.clone() attr:class="navbar__link navbar__link--login">
                                "Login"
                            </A>
                        }
                    }
                >
                    <A href=create_href.clone() attr:class="navbar__link">"Create Post"</A>
                    <span class="navbar__greeting">{greeting}</span>
                    <button class="navbar__logout" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </nav>
        </header>
    }
}

fn greeting_for(state: &AuthState) -> String {
    state.user.as_ref().map(|user| format!("Hi, {}", user.display_name())).unwrap_or_default()
}
