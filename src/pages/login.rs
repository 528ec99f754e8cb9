//! Login page for email + password auth.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::controller::{AuthController, LOGIN_FAILED};
use crate::util::lifecycle::Liveness;

const FIELDS_REQUIRED: &str = "Email and password are required.";

/// Trim the email and require both fields.
fn validate_login_input(email: &str, password: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    Ok(email.to_owned())
}

fn login_failure_message(state: &AuthState) -> String {
    state.error.clone().filter(|m| !m.trim().is_empty()).unwrap_or_else(|| LOGIN_FAILED.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();
    let alive = Liveness::install();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let pending_nav = RwSignal::new(None::<String>);
    Effect::new(move || {
        if let Some(path) = pending_nav.get() {
            pending_nav.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });

    let post_login_path = config.post_login_path;
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        info.set(String::new());
        controller.clear_error();
        let email_value = match validate_login_input(&email.get(), &password.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        let password_value = password.get();
        busy.set(true);

        let controller = controller.clone();
        let post_login_path = post_login_path.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let ok = controller.login(&email_value, &password_value).await;
            if !alive.is_alive() {
                return;
            }
            if ok {
                pending_nav.set(Some(post_login_path));
            } else {
                info.set(login_failure_message(&controller.state()));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin Login"</h1>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit novalidate>
                    <label for="email">"Email Address"</label>
                    <input
                        id="email"
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "No account? "
                    <A href="/signup">"Sign up"</A>
                </p>
                <A href="/" attr:class="login-card__back">"Back to Site"</A>
            </div>
        </div>
    }
}
