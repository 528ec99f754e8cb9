//! Account registration page.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::controller::AuthController;
use crate::util::delay::sleep;
use crate::util::lifecycle::Liveness;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const REGISTERED: &str = "Registration successful! Redirecting to login...";
const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
struct SignupInput {
    username: String,
    email: String,
    password: String,
}

/// Client-side checks, in the order the user should fix them.
fn validate_signup(username: &str, email: &str, password: &str, confirm: &str) -> Result<SignupInput, &'static str> {
    if username.trim().is_empty() || email.trim().is_empty() || password.trim().is_empty() {
        return Err("Username, email, and password are required.");
    }
    if !looks_like_email(email) {
        return Err("Please enter a valid email address.");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 6 characters long.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(SignupInput { username: username.trim().to_owned(), email: email.trim().to_owned(), password: password.to_owned() })
}

/// True if some whitespace-free run reads `x@y.z`.
fn looks_like_email(raw: &str) -> bool {
    raw.split_whitespace().any(|word| {
        word.match_indices('@').any(|(at, _)| {
            let domain = &word[at + 1..];
            at > 0 && domain.char_indices().any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
        })
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let controller = expect_context::<AuthController>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();
    let alive = Liveness::install();

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let success = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    controller.clear_error();

    let pending_nav = RwSignal::new(None::<String>);
    Effect::new(move || {
        if let Some(path) = pending_nav.get() {
            pending_nav.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });

    let login_path = config.login_path;
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        success.set(String::new());
        controller.clear_error();
        let input = match validate_signup(&username.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(input) => input,
            Err(message) => {
                error.set(message.to_owned());
                return;
            }
        };
        busy.set(true);

        let controller = controller.clone();
        let login_path = login_path.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let result = controller.register(&input.username, &input.email, &input.password).await;
            if !alive.is_alive() {
                return;
            }
            busy.set(false);
            match result {
                Ok(()) => {
                    success.set(REGISTERED.to_owned());
                    for field in [username, email, password, confirm] {
                        field.set(String::new());
                    }
                    sleep(REDIRECT_DELAY).await;
                    if alive.is_alive() {
                        pending_nav.set(Some(login_path));
                    }
                }
                Err(message) => error.set(message),
            }
        });
    };

    let text_input = move |id: &'static str, kind: &'static str, autocomplete: &'static str, field: RwSignal<String>| {
        view! {
            <input
                id=id
                class="login-input"
                type=kind
                autocomplete=autocomplete
                prop:value=move || field.get()
                on:input=move |ev| field.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <Show when=move || !success.get().is_empty()>
                    <p class="login-message login-message--success">{move || success.get()}</p>
                </Show>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message">{move || error.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit novalidate>
                    <label for="username">"Username"</label>
                    {text_input("username", "text", "username", username)}
                    <label for="email">"Email Address"</label>
                    {text_input("email", "email", "email", email)}
                    <label for="password">"Password"</label>
                    {text_input("password", "password", "new-password", password)}
                    <label for="confirm-password">"Confirm Password"</label>
                    {text_input("confirm-password", "password", "new-password", confirm)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already have an account? "
                    <A href="/login">"Log in"</A>
                </p>
            </div>
        </div>
    }
}
