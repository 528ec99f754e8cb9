//! HTTP transport seam beneath the API gateway.
//!
//! Client-side (csr): real requests via `gloo-net`.
//! Elsewhere: an offline transport that fails every exchange, since the
//! endpoints are only reachable from the browser.
//!
//! The trait is `?Send` because browser fetch futures are not `Send`; the
//! transport objects themselves are `Send + Sync` so they can live in
//! Leptos context.

use std::sync::Arc;

use super::error::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// One outgoing request. `bearer` is the raw token without the scheme.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// A received response, successful or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Carries a single request/response exchange.
#[async_trait::async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport for the current build target.
#[must_use]
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "csr")]
    {
        Arc::new(BrowserTransport)
    }
    #[cfg(not(feature = "csr"))]
    {
        Arc::new(OfflineTransport)
    }
}

/// `fetch`-backed transport.
#[cfg(feature = "csr")]
pub struct BrowserTransport;

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        }
        .header("Accept", "application/json");
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let sent = match request.body {
            Some(body) => builder.json(&body).map_err(|e| TransportError(e.to_string()))?.send().await,
            None => builder.send().await,
        };
        let resp = sent.map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Ok(HttpResponse { status, body })
    }
}

/// Transport for builds without a browser.
#[cfg(not(feature = "csr"))]
pub struct OfflineTransport;

#[cfg(not(feature = "csr"))]
#[async_trait::async_trait(?Send)]
impl Transport for OfflineTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError(format!("{} is not reachable outside the browser", request.url)))
    }
}
