//! Timer helper for delayed UI follow-ups (redirects, toast clearing).

use std::time::Duration;

/// Resolve after `duration` in the browser; immediately elsewhere.
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "csr")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(feature = "csr"))]
    let _ = duration;
}
