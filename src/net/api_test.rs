use super::*;
use crate::net::fake::{BASE, FakeBackend};

fn client(backend: &FakeBackend) -> ApiClient {
    ApiClient::new(BASE, backend.transport())
}

// =============================================================
// Endpoint helpers
// =============================================================

#[test]
fn post_endpoint_formats_expected_path() {
    assert_eq!(post_endpoint(42), "/posts/42");
}

#[test]
fn post_page_endpoint_formats_query() {
    assert_eq!(post_page_endpoint(2, 5), "/posts?page=2&per_page=5");
}

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let api = ApiClient::new("/api/", FakeBackend::new().transport());
    assert_eq!(api.url("/posts"), "/api/posts");
}

// =============================================================
// Bearer attachment
// =============================================================

#[tokio::test]
async fn requests_carry_no_bearer_before_authentication() {
    let backend = FakeBackend::new().with_post("One", "<p>1</p>");
    let api = client(&backend);
    api.list_posts().await.unwrap();
    assert!(backend.requests().iter().all(|r| r.bearer.is_none()));
}

#[tokio::test]
async fn attached_token_is_sent_on_every_request() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let api = client(&backend);
    let login = api.login("a@x.com", "secret1").await.unwrap();
    api.set_token(Some(login.token.clone()));

    api.fetch_current_user().await.unwrap();
    api.list_posts().await.unwrap();

    let requests = backend.requests();
    assert!(requests[0].bearer.is_none());
    assert!(requests[1..].iter().all(|r| r.bearer.as_deref() == Some(login.token.as_str())));
}

// =============================================================
// Auth endpoints
// =============================================================

#[tokio::test]
async fn login_returns_token_and_user() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let login = client(&backend).login("a@x.com", "secret1").await.unwrap();
    assert!(!login.token.is_empty());
    assert_eq!(login.user.username.as_deref(), Some("alice"));
    assert_eq!(login.user.email, "a@x.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_invalid_credentials() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let err = client(&backend).login("a@x.com", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::InvalidCredentials { message: Some("Invalid email or password".to_owned()) });
}

#[tokio::test]
async fn login_transport_failure_is_network() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    backend.set_offline(true);
    let err = client(&backend).login("a@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn login_malformed_success_body_is_network() {
    let backend = FakeBackend::new();
    backend.respond_with(Method::Post, "/auth/login", 200, "not json");
    let err = client(&backend).login("a@x.com", "secret1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(ref m) if m.starts_with("malformed response")));
}

#[tokio::test]
async fn register_duplicate_email_is_validation() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let err = client(&backend).register("alice2", "a@x.com", "secret1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation { message: Some("User already exists with that username or email".to_owned()) }
    );
}

#[tokio::test]
async fn register_then_login_succeeds() {
    let backend = FakeBackend::new();
    let api = client(&backend);
    api.register("alice", "a@x.com", "secret1").await.unwrap();
    let login = api.login("a@x.com", "secret1").await.unwrap();
    assert_eq!(login.user.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn fetch_current_user_with_invalid_token_is_unauthorized() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let api = client(&backend);
    api.set_token(Some("stale".to_owned()));
    assert!(api.fetch_current_user().await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn fetch_current_user_accepts_wrapped_body() {
    let backend = FakeBackend::new();
    backend.respond_with(Method::Get, "/auth/me", 200, r#"{"user":{"id":4,"username":"bob","email":"b@x.com"}}"#);
    let user = client(&backend).fetch_current_user().await.unwrap();
    assert_eq!(user.id, 4);
    assert_eq!(user.username.as_deref(), Some("bob"));
}

#[tokio::test]
async fn logout_revokes_server_token() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let api = client(&backend);
    let token = backend.issue_token("a@x.com");
    api.set_token(Some(token.clone()));
    api.logout().await.unwrap();
    assert!(!backend.token_is_live(&token));
}

#[tokio::test]
async fn revoke_uses_explicit_token_not_attached_one() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let api = client(&backend);
    let token = backend.issue_token("a@x.com");
    api.revoke(Some(token.clone())).await.unwrap();
    assert_eq!(backend.requests()[0].bearer.as_deref(), Some(token.as_str()));
    assert!(api.token().is_none());
}

// =============================================================
// Posts
// =============================================================

#[tokio::test]
async fn list_posts_returns_newest_first() {
    let backend = FakeBackend::new().with_post("First", "a").with_post("Second", "b");
    let posts = client(&backend).list_posts().await.unwrap();
    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn list_posts_page_reports_navigation() {
    let backend = FakeBackend::new().with_post("1", "a").with_post("2", "b").with_post("3", "c");
    let api = client(&backend);
    let page = api.list_posts_page(1, 2).await.unwrap();
    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.next_page_num, Some(2));
    assert_eq!(page.prev_page_num, None);

    let last = api.list_posts_page(2, 2).await.unwrap();
    assert_eq!(last.posts.len(), 1);
    assert_eq!(last.next_page_num, None);
    assert_eq!(last.prev_page_num, Some(1));
}

#[tokio::test]
async fn list_posts_page_clamps_arguments() {
    let backend = FakeBackend::new();
    client(&backend).list_posts_page(0, 500).await.unwrap();
    assert_eq!(backend.requests()[0].url, "/api/posts?page=1&per_page=100");
}

#[tokio::test]
async fn list_posts_server_error_is_network() {
    let backend = FakeBackend::new();
    backend.respond_with(Method::Get, "/posts", 500, "");
    assert!(matches!(client(&backend).list_posts().await, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn fetch_missing_post_is_not_found() {
    let backend = FakeBackend::new().with_post("One", "a");
    let err = client(&backend).fetch_post(999).await.unwrap_err();
    assert_eq!(err, ApiError::NotFound);
}

#[tokio::test]
async fn fetch_post_returns_post() {
    let backend = FakeBackend::new().with_post("One", "<p>a</p>");
    let post = client(&backend).fetch_post(1).await.unwrap();
    assert_eq!(post.title, "One");
    assert_eq!(post.content, "<p>a</p>");
}

#[tokio::test]
async fn create_post_without_token_sends_nothing() {
    let backend = FakeBackend::new();
    let err = client(&backend).create_post("Title", "Body").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(backend.requests().is_empty());
    assert_eq!(backend.post_count(), 0);
}

#[tokio::test]
async fn create_post_with_blank_fields_sends_nothing() {
    let backend = FakeBackend::new();
    let api = client(&backend);
    api.set_token(Some("tok".to_owned()));
    let err = api.create_post("  ", "Body").await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn create_post_with_rejected_token_is_unauthorized() {
    let backend = FakeBackend::new();
    let api = client(&backend);
    api.set_token(Some("expired".to_owned()));
    let err = api.create_post("Title", "Body").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized { message: Some("Authentication required".to_owned()) });
    assert_eq!(backend.post_count(), 0);
}

#[tokio::test]
async fn create_post_publishes_with_author() {
    let backend = FakeBackend::new().with_user("alice", "a@x.com", "secret1");
    let api = client(&backend);
    api.set_token(Some(backend.issue_token("a@x.com")));
    let post = api.create_post("Hello", "<p>World</p>").await.unwrap();
    assert_eq!(post.author_username.as_deref(), Some("alice"));
    assert_eq!(backend.post_count(), 1);
    assert_eq!(backend.count(Method::Post, "/posts"), 1);
}
