//! REST gateway for the blog server.
//!
//! SYSTEM CONTEXT
//! ==============
//! One configured client is built at the composition root and shared by the
//! auth controller and pages. Once a token is attached every request carries
//! `Authorization: Bearer <token>`; before that, requests carry none.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses are classified per operation into [`ApiError`], so
//! callers branch on kind and display `message_or` text without string
//! matching.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Operation};
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::{
    CreatePostRequest, CurrentUserResponse, ErrorBody, LoginRequest, LoginResponse, Post, PostPage, RegisterRequest,
    User,
};

fn post_endpoint(id: i64) -> String {
    format!("/posts/{id}")
}

fn post_page_endpoint(page: u32, per_page: u32) -> String {
    format!("/posts?page={page}&per_page={per_page}")
}

/// Shared HTTP entry point for every REST call.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    token: Arc<Mutex<Option<String>>>,
}

impl ApiClient {
    /// Build a client rooted at `base_url` (e.g. `"/api"`).
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, transport, token: Arc::new(Mutex::new(None)) }
    }

    /// Attach or detach the bearer token used by subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// The currently attached bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidCredentials`] on 4xx, [`ApiError::Network`] otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = json_body(&LoginRequest { email, password })?;
        let resp = self.send(Method::Post, "/auth/login", self.token(), Some(body)).await?;
        decode(Operation::Login, &resp)
    }

    /// `POST /auth/register`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] on 4xx (e.g. duplicate email).
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let body = json_body(&RegisterRequest { username, email, password })?;
        let resp = self.send(Method::Post, "/auth/register", self.token(), Some(body)).await?;
        expect_success(Operation::Register, &resp)
    }

    /// `POST /auth/logout` with the attached token.
    ///
    /// # Errors
    ///
    /// Any transport or status failure. Callers treat this as best-effort.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.revoke(self.token()).await
    }

    /// `POST /auth/logout` on behalf of `token`, independent of the attached one.
    ///
    /// # Errors
    ///
    /// Any transport or status failure.
    pub async fn revoke(&self, token: Option<String>) -> Result<(), ApiError> {
        let resp = self.send(Method::Post, "/auth/logout", token, None).await?;
        expect_success(Operation::Logout, &resp)
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] when the token is missing, invalid, or expired.
    pub async fn fetch_current_user(&self) -> Result<User, ApiError> {
        let resp = self.send(Method::Get, "/auth/me", self.token(), None).await?;
        decode::<CurrentUserResponse>(Operation::CurrentUser, &resp).map(CurrentUserResponse::into_user)
    }

    /// First page of posts, newest first.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] on any failure.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let resp = self.send(Method::Get, "/posts", self.token(), None).await?;
        decode::<PostPage>(Operation::ListPosts, &resp).map(|page| page.posts)
    }

    /// A specific page of posts with pagination metadata.
    ///
    /// # Errors
    ///
    /// [`ApiError::Network`] on any failure.
    pub async fn list_posts_page(&self, page: u32, per_page: u32) -> Result<PostPage, ApiError> {
        let path = post_page_endpoint(page.max(1), per_page.clamp(1, 100));
        let resp = self.send(Method::Get, &path, self.token(), None).await?;
        decode(Operation::ListPosts, &resp)
    }

    /// `GET /posts/:id`.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] on 404.
    pub async fn fetch_post(&self, id: i64) -> Result<Post, ApiError> {
        let resp = self.send(Method::Get, &post_endpoint(id), self.token(), None).await?;
        decode(Operation::FetchPost, &resp)
    }

    /// `POST /posts`. Requires an attached token.
    ///
    /// Blank fields and a missing token are rejected before any request is
    /// sent.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] without a token or on 401,
    /// [`ApiError::Validation`] for blank fields or other 4xx.
    pub async fn create_post(&self, title: &str, content: &str) -> Result<Post, ApiError> {
        let Some(token) = self.token() else {
            return Err(ApiError::Unauthorized { message: Some("Authentication required".to_owned()) });
        };
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(ApiError::Validation { message: Some("Title and content are required.".to_owned()) });
        }
        let body = json_body(&CreatePostRequest { title, content })?;
        let resp = self.send(Method::Post, "/posts", Some(token), Some(body)).await?;
        decode(Operation::CreatePost, &resp)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        bearer: Option<String>,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest { method, url: self.url(path), bearer, body };
        log::debug!("{:?} {}", request.method, request.url);
        Ok(self.transport.send(request).await?)
    }
}

fn json_body<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Network(e.to_string()))
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message)
}

fn expect_success(op: Operation, resp: &HttpResponse) -> Result<(), ApiError> {
    if resp.ok() {
        Ok(())
    } else {
        Err(ApiError::from_status(op, resp.status, error_message(&resp.body)))
    }
}

fn decode<T: DeserializeOwned>(op: Operation, resp: &HttpResponse) -> Result<T, ApiError> {
    expect_success(op, resp)?;
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Network(format!("malformed response: {e}")))
}
