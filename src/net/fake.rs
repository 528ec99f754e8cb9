//! In-memory stand-in for the blog server, used by async tests.
//!
//! Emulates the REST contract (status codes, `{message}` error bodies,
//! bearer-token sessions) and records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::TransportError;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::{Post, User};

pub(crate) const BASE: &str = "/api";

#[derive(Default)]
struct FakeState {
    users: Vec<(User, String)>,
    tokens: HashMap<String, i64>,
    posts: Vec<Post>,
    requests: Vec<HttpRequest>,
    overrides: HashMap<(Method, String), HttpResponse>,
    offline: bool,
    next_token: u64,
}

#[derive(Clone, Default)]
pub(crate) struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    pub(crate) fn with_user(self, username: &str, email: &str, password: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = i64::try_from(state.users.len()).unwrap() + 1;
            let user = User { id, username: Some(username.to_owned()), email: email.to_owned(), created_at: None };
            state.users.push((user, password.to_owned()));
        }
        self
    }

    pub(crate) fn with_post(self, title: &str, content: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = i64::try_from(state.posts.len()).unwrap() + 1;
            state.posts.push(Post {
                id,
                title: title.to_owned(),
                content: content.to_owned(),
                created_at: Some("2023-10-26T10:00:00Z".to_owned()),
                author_username: Some("admin".to_owned()),
                user_id: Some(1),
            });
        }
        self
    }

    /// Issue a server-side session for `email` as if a login happened earlier.
    pub(crate) fn issue_token(&self, email: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.id).unwrap();
        state.next_token += 1;
        let token = format!("tok-{}", state.next_token);
        state.tokens.insert(token.clone(), id);
        token
    }

    pub(crate) fn token_is_live(&self, token: &str) -> bool {
        self.state.lock().unwrap().tokens.contains_key(token)
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    pub(crate) fn respond_with(&self, method: Method, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert((method, path.to_owned()), HttpResponse { status, body: body.to_owned() });
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE}{path}");
        self.requests().iter().filter(|r| r.method == method && r.url == url).count()
    }

    pub(crate) fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let full = request.url.strip_prefix(BASE).unwrap_or(&request.url);
        let (path, query) = full.split_once('?').unwrap_or((full, ""));
        if let Some(resp) = state.overrides.get(&(request.method, path.to_owned())) {
            return resp.clone();
        }
        let body = request.body.clone().unwrap_or(serde_json::Value::Null);
        let field = |name: &str| body.get(name).and_then(serde_json::Value::as_str).unwrap_or_default().to_owned();
        let caller = request.bearer.as_ref().and_then(|t| state.tokens.get(t).copied());

        match (request.method, path) {
            (Method::Post, "/auth/register") => {
                let (username, email, password) = (field("username"), field("email"), field("password"));
                if username.is_empty() || email.is_empty() || password.is_empty() {
                    return message(400, "Missing username, email, or password");
                }
                if password.len() < 6 {
                    return message(400, "Password must be at least 6 characters long");
                }
                if state.users.iter().any(|(u, _)| u.email == email || u.username.as_deref() == Some(username.as_str())) {
                    return message(409, "User already exists with that username or email");
                }
                let id = i64::try_from(state.users.len()).unwrap() + 1;
                let user = User { id, username: Some(username), email, created_at: None };
                state.users.push((user.clone(), password));
                json(201, &serde_json::json!({ "message": "User registered successfully", "user": user }))
            }
            (Method::Post, "/auth/login") => {
                let (email, password) = (field("email"), field("password"));
                if email.is_empty() || password.is_empty() {
                    return message(400, "Email and password are required");
                }
                let found = state.users.iter().find(|(u, p)| u.email == email && *p == password);
                let Some(user) = found.map(|(u, _)| u.clone()) else {
                    return message(401, "Invalid email or password");
                };
                state.next_token += 1;
                let token = format!("tok-{}", state.next_token);
                state.tokens.insert(token.clone(), user.id);
                json(200, &serde_json::json!({ "message": "Login successful", "token": token, "user": user }))
            }
            (Method::Post, "/auth/logout") => {
                if let Some(token) = &request.bearer {
                    state.tokens.remove(token);
                }
                message(200, "Logout successful")
            }
            (Method::Get, "/auth/me") => match caller.and_then(|id| state.users.iter().find(|(u, _)| u.id == id)) {
                Some((user, _)) => json(200, user),
                None => message(401, "Not authenticated or token invalid/expired"),
            },
            (Method::Get, "/posts") => {
                let param = |name: &str| {
                    query
                        .split('&')
                        .filter_map(|kv| kv.split_once('='))
                        .find(|(k, _)| *k == name)
                        .and_then(|(_, v)| v.parse::<usize>().ok())
                };
                let page = param("page").unwrap_or(1).max(1);
                let per_page = param("per_page").unwrap_or(10).clamp(1, 100);
                let mut newest_first = state.posts.clone();
                newest_first.reverse();
                let total = newest_first.len();
                let pages = total.div_ceil(per_page);
                let items: Vec<Post> = newest_first.into_iter().skip((page - 1) * per_page).take(per_page).collect();
                json(
                    200,
                    &serde_json::json!({
                        "posts": items,
                        "total_posts": total,
                        "total_pages": pages,
                        "current_page": page,
                        "per_page": per_page,
                        "next_page_num": if page < pages { Some(page + 1) } else { None },
                        "prev_page_num": if page > 1 { Some(page - 1) } else { None },
                    }),
                )
            }
            (Method::Post, "/posts") => {
                let Some(author_id) = caller else {
                    return message(401, "Authentication required");
                };
                let (title, content) = (field("title"), field("content"));
                if title.is_empty() || content.is_empty() {
                    return message(400, "Title and content are required");
                }
                let author = state.users.iter().find(|(u, _)| u.id == author_id).and_then(|(u, _)| u.username.clone());
                let id = i64::try_from(state.posts.len()).unwrap() + 1;
                let post = Post {
                    id,
                    title,
                    content,
                    created_at: Some("2024-05-01T12:00:00Z".to_owned()),
                    author_username: author,
                    user_id: Some(author_id),
                };
                state.posts.push(post.clone());
                json(201, &post)
            }
            (Method::Get, other) => {
                let id = other.strip_prefix("/posts/").and_then(|raw| raw.parse::<i64>().ok());
                match id.and_then(|id| state.posts.iter().find(|p| p.id == id)) {
                    Some(post) => json(200, post),
                    None => HttpResponse { status: 404, body: "<h1>Not Found</h1>".to_owned() },
                }
            }
            _ => HttpResponse { status: 405, body: String::new() },
        }
    }
}

fn json<T: serde::Serialize>(status: u16, value: &T) -> HttpResponse {
    HttpResponse { status, body: serde_json::to_string(value).unwrap() }
}

fn message(status: u16, text: &str) -> HttpResponse {
    json(status, &serde_json::json!({ "message": text }))
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let offline = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            state.offline
        };
        if offline {
            return Err(TransportError("connection refused".to_owned()));
        }
        Ok(self.handle(&request))
    }
}
