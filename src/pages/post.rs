//! Single-post view.

#[cfg(test)]
#[path = "post_test.rs"]
mod post_test;

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::Post;
use crate::util::format::{display_title, format_post_date};
use crate::util::lifecycle::Liveness;

pub const LOADING_POST: &str = "Loading post...";
pub const POST_NOT_FOUND: &str = "Post not found.";
pub const POST_FAILED: &str = "Failed to fetch post. Please try again later.";

#[derive(Clone, Debug, PartialEq, Eq)]
enum PostView {
    Loading,
    Loaded(Post),
    Failed(&'static str),
}

/// Route ids are positive integers; anything else cannot name a post.
fn parse_post_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn post_error_message(err: &ApiError) -> &'static str {
    match err {
        ApiError::NotFound => POST_NOT_FOUND,
        _ => POST_FAILED,
    }
}

fn document_title(post: Option<&Post>, app_name: &str) -> String {
    match post.map(|p| p.title.trim()).filter(|t| !t.is_empty()) {
        Some(title) => format!("{title} - {app_name}"),
        None => app_name.to_owned(),
    }
}

/// Store a fetch result for post `id` if the page is still mounted and the
/// route still names that post. Returns whether it was stored.
fn settle_post(
    alive: &Liveness,
    current_id: RwSignal<Option<i64>>,
    state: RwSignal<PostView>,
    id: i64,
    next: PostView,
) -> bool {
    if !alive.is_alive() || current_id.get_untracked() != Some(id) {
        return false;
    }
    state.set(next);
    true
}

#[component]
pub fn ViewPostPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let config = expect_context::<ClientConfig>();
    let params = use_params_map();
    let state = RwSignal::new(PostView::Loading);
    // Id the route currently names; responses for any other id are stale.
    let current_id = RwSignal::new(None::<i64>);
    let alive = Liveness::install();

    Effect::new(move || {
        let raw = params.read().get("id").unwrap_or_default();
        let parsed = parse_post_id(&raw);
        current_id.set(parsed);
        let Some(id) = parsed else {
            state.set(PostView::Failed(POST_NOT_FOUND));
            return;
        };
        state.set(PostView::Loading);
        let api = api.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let next = match api.fetch_post(id).await {
                Ok(post) => PostView::Loaded(post),
                Err(err) => {
                    log::warn!("post {id} fetch failed: {err}");
                    PostView::Failed(post_error_message(&err))
                }
            };
            settle_post(&alive, current_id, state, id, next);
        });
    });

    let app_name = config.app_name;
    let title = move || {
        state.with(|view| match view {
            PostView::Loaded(post) => document_title(Some(post), &app_name),
            _ => document_title(None, &app_name),
        })
    };

    view! {
        <Title text=title/>
        <section class="post-page">
            {move || match state.get() {
                PostView::Loading => view! { <p class="status">{LOADING_POST}</p> }.into_any(),
                PostView::Failed(message) => view! { <p class="status status--error">{message}</p> }.into_any(),
                PostView::Loaded(post) => {
                    let published = format!("Published on {}", format_post_date(post.created_at.as_deref()));
                    view! {
                        <article class="post">
                            <h1 class="post__title">{display_title(&post.title).to_owned()}</h1>
                            <p class="post__meta">
                                {published}
                                {post.author_username.map(|name| format!(" by {name}"))}
                            </p>
                            <div class="post__content" inner_html=post.content></div>
                        </article>
                    }
                        .into_any()
                }
            }}
            <A href="/" attr:class="post-page__back">"Back to All Posts"</A>
        </section>
    }
}
