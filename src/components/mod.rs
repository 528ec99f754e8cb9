//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome and post previews while reading shared
//! auth and config state from Leptos context providers.

pub mod footer;
pub mod navbar;
pub mod post_card;
pub mod protected_route;
