//! Networking modules for the blog REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the gateway every page and the auth controller call through,
//! `transport` is the swappable HTTP seam beneath it, `error` classifies
//! failures, and `types` defines the shared wire schema.

pub mod api;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod transport;
pub mod types;
