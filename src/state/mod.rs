//! Client-side authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the persisted token and resolved profile, `controller` runs
//! the auth state machine over it, and `auth` is the snapshot broadcast to
//! the view layer after every transition.

pub mod auth;
pub mod controller;
pub mod session;
