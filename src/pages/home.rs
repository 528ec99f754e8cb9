//! Home page listing the latest posts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Fetches one page of `/posts` whenever the page number
//! changes and renders each entry as a post card.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::post_card::PostCard;
use crate::net::api::ApiClient;
use crate::net::types::PostPage;
use crate::util::lifecycle::Liveness;

pub const POSTS_PER_PAGE: u32 = 10;
pub const LOADING_POSTS: &str = "Loading posts...";
pub const NO_POSTS: &str = "No posts available yet. Check back soon!";
pub const POSTS_FAILED: &str = "Failed to fetch posts. Please try again later.";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Listing {
    Loading,
    Loaded(PostPage),
    Failed,
}

/// Status line to show instead of the post grid, if any.
fn listing_status(listing: &Listing) -> Option<&'static str> {
    match listing {
        Listing::Loading => Some(LOADING_POSTS),
        Listing::Failed => Some(POSTS_FAILED),
        Listing::Loaded(page) if page.posts.is_empty() => Some(NO_POSTS),
        Listing::Loaded(_) => None,
    }
}

/// Previous and next page numbers advertised by the server.
fn page_links(page: &PostPage) -> (Option<u32>, Option<u32>) {
    let to_page = |n: Option<i64>| n.and_then(|n| u32::try_from(n).ok()).filter(|n| *n >= 1);
    (to_page(page.prev_page_num), to_page(page.next_page_num))
}

/// Store a fetched listing if the page is still mounted and `requested` is
/// still the page being shown. Returns whether it was stored.
fn settle_listing(
    alive: &Liveness,
    page: RwSignal<u32>,
    listing: RwSignal<Listing>,
    requested: u32,
    next: Listing,
) -> bool {
    if !alive.is_alive() || page.get_untracked() != requested {
        return false;
    }
    listing.set(next);
    true
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let page = RwSignal::new(1_u32);
    let listing = RwSignal::new(Listing::Loading);
    let alive = Liveness::install();

    Effect::new(move || {
        let requested = page.get();
        listing.set(Listing::Loading);
        let api = api.clone();
        let alive = alive.clone();
        leptos::task::spawn_local(async move {
            let next = match api.list_posts_page(requested, POSTS_PER_PAGE).await {
                Ok(data) => Listing::Loaded(data),
                Err(err) => {
                    log::warn!("post listing failed: {err}");
                    Listing::Failed
                }
            };
            // A newer page request supersedes this response.
            settle_listing(&alive, page, listing, requested, next);
        });
    });

    view! {
        <section class="home-page">
            <h1 class="home-page__title">"Latest Posts"</h1>
            {move || {
                let current = listing.get();
                if let Some(status) = listing_status(&current) {
                    return view! { <p class="status">{status}</p> }.into_any();
                }
                let Listing::Loaded(data) = current else {
                    return ().into_any();
                };
                let (prev, next) = page_links(&data);
                view! {
                    <div class="post-grid">
                        {data.posts.into_iter().map(|post| view! { <PostCard post/> }).collect_view()}
                    </div>
                    <nav class="pagination">
                        <button
                            class="pagination__prev"
                            disabled=prev.is_none()
                            on:click=move |_| {
                                if let Some(n) = prev {
                                    page.set(n);
                                }
                            }
                        >
                            "Previous"
                        </button>
                        <button
                            class="pagination__next"
                            disabled=next.is_none()
                            on:click=move |_| {
                                if let Some(n) = next {
                                    page.set(n);
                                }
                            }
                        >
                            "Next"
                        </button>
                    </nav>
                }
                    .into_any()
            }}
        </section>
    }
}
