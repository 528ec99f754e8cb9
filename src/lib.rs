//! # simpleblog
//!
//! Leptos + WASM client for the SimpleBlog service: a public post feed, a
//! single-post view, and an authenticated publishing flow.
//!
//! This crate contains the session store and auth state machine, the REST
//! gateway client, the route guard, and the pages and components that render
//! on top of them. Browser glue is behind the `csr` feature; without it the
//! crate builds natively so the state and networking layers can be tested
//! against an in-memory backend.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic and log hooks, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
