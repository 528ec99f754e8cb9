//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Validation and message selection live in plain functions
//! beside each page so they can be tested without a DOM.

pub mod create_post;
pub mod home;
pub mod login;
pub mod post;
pub mod signup;
