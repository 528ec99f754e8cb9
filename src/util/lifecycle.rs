//! Liveness of the reactive owner that spawned a background task.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages spawn fetches and timers with `spawn_local`. When the user navigates
//! away first, the page owner is cleaned up and its signals are disposed;
//! touching them afterwards panics. Tasks check [`Liveness::is_alive`] after
//! every `await` before reading or writing page signals.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

/// Flag cleared when the current reactive owner is cleaned up.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// Create the flag and clear it from the current owner's cleanup.
    pub fn install() -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        let on_dispose = Arc::clone(&alive);
        on_cleanup(move || on_dispose.store(false, Ordering::Relaxed));
        Self(alive)
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
