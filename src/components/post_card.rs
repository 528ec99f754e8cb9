//! Reusable card component for post list items on the home page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Post;
use crate::util::format::{EXCERPT_CHARS, display_title, excerpt, format_post_date};

/// A post preview linking to the full post.
#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let href = format!("/post/{}", post.id);
    let title = display_title(&post.title).to_owned();
    let published = format!("Published on {}", format_post_date(post.created_at.as_deref()));
    let author = post.author_username.filter(|name| !name.is_empty());
    let preview = excerpt(&post.content, EXCERPT_CHARS);

    view! {
        <article class="post-card">
            <A href=href.clone() attr:class="post-card__title">
                <h2>{title}</h2>
            </A>
            <p class="post-card__meta">
                {published}
                {author.map(|name| view! { <span class="post-card__author">{format!(" by {name}")}</span> })}
            </p>
            <p class="post-card__excerpt">{preview}</p>
            <A href=href attr:class="post-card__more">"Read More"</A>
        </article>
    }
}
