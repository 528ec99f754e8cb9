//! Post publishing page. Rendered behind the route guard.

#[cfg(test)]
#[path = "create_post_test.rs"]
mod create_post_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::Post;
use crate::state::controller::AuthController;
use crate::util::delay::sleep;
use crate::util::lifecycle::Liveness;

pub const FIELDS_REQUIRED: &str = "Title and content are required.";
pub const PUBLISHED: &str = "Blog post published successfully!";
pub const PUBLISH_FAILED: &str = "Failed to publish post.";
const SUCCESS_VISIBLE_FOR: Duration = Duration::from_secs(3);

fn validate_post_input(title: &str, content: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    Ok(())
}

fn publish_error_message(err: &ApiError) -> String {
    err.message_or(PUBLISH_FAILED)
}

/// Form signals owned by the page.
#[derive(Clone, Copy)]
struct PublishForm {
    title: RwSignal<String>,
    content: RwSignal<String>,
    error: RwSignal<String>,
    success: RwSignal<String>,
    busy: RwSignal<bool>,
    // Bumped per publish so an older timer cannot clear a newer message.
    success_seq: RwSignal<u64>,
}

impl PublishForm {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
            error: RwSignal::new(String::new()),
            success: RwSignal::new(String::new()),
            busy: RwSignal::new(false),
            success_seq: RwSignal::new(0),
        }
    }

    /// Apply a publish result. Returns the sequence number to hand to
    /// [`PublishForm::expire_success`], or `None` if nothing should expire.
    fn finish(self, alive: &Liveness, result: &Result<Post, ApiError>) -> Option<u64> {
        if !alive.is_alive() {
            return None;
        }
        self.busy.set(false);
        match result {
            Ok(_) => {
                self.title.set(String::new());
                self.content.set(String::new());
                self.success.set(PUBLISHED.to_owned());
                self.success_seq.update(|n| *n += 1);
                Some(self.success_seq.get_untracked())
            }
            Err(err) => {
                self.error.set(publish_error_message(err));
                None
            }
        }
    }

    /// Hide the success message unless a later publish replaced it.
    fn expire_success(self, alive: &Liveness, seq: u64) {
        if alive.is_alive() && self.success_seq.get_untracked() == seq {
            self.success.set(String::new());
        }
    }
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let controller = expect_context::<AuthController>();
    let alive = Liveness::install();

    let form = PublishForm::new();
    let PublishForm { title, content, error, success, busy, .. } = form;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        success.set(String::new());
        let (title_value, content_value) = (title.get(), content.get());
        if let Err(message) = validate_post_input(&title_value, &content_value) {
            error.set(message.to_owned());
            return;
        }
        busy.set(true);

        let api = api.clone();
        let controller = controller.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let result = api.create_post(&title_value, &content_value).await;
            match &result {
                Ok(post) => log::debug!("published post {}", post.id),
                Err(err) if err.is_unauthorized() => {
                    // The server already dropped the token; the guard sends
                    // the user to the login page.
                    log::warn!("publish rejected, session expired: {err}");
                    controller.end_session();
                }
                Err(err) => log::warn!("publish failed: {err}"),
            }
            let Some(seq) = form.finish(&alive, &result) else {
                return;
            };
            sleep(SUCCESS_VISIBLE_FOR).await;
            form.expire_success(&alive, seq);
        });
    };

    view! {
        <section class="create-post-page">
            <h1>"Create New Blog Post"</h1>
            <Show when=move || !success.get().is_empty()>
                <p class="form-message form-message--success">{move || success.get()}</p>
            </Show>
            <Show when=move || !error.get().is_empty()>
                <p class="form-message form-message--error">{move || error.get()}</p>
            </Show>
            <form class="create-post-form" on:submit=on_submit>
                <label for="post-title">"Post Title"</label>
                <input
                    id="post-title"
                    type="text"
                    placeholder="Enter your post title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <label for="post-content">"Post Content"</label>
                <textarea
                    id="post-content"
                    rows="12"
                    placeholder="Write your blog post here..."
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>
                <button class="create-post-form__submit" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Publishing..." } else { "Publish Post" }}
                </button>
            </form>
        </section>
    }
}
